use clap::{Arg, Command};
use piglatin_relay::{
    ChannelDispatcher, GoogleTranslateProvider, InboundEvent, LanguageDetector, MessageProcessor,
    MockDetector, MockMode, MockTranslator, RecordingEventBus, RecordingQueue, RelayConfig,
    Translator,
};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = Command::new("piglatin-relay")
        .version("0.1.0")
        .about("Translate a message to English, Pig Latin it, and relay it to a channel")
        .arg(
            Arg::new("message")
                .help("Message to process")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("channel")
                .help("Destination channel (Teams, SQS or SendGrid)")
                .default_value("Teams")
                .index(2),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Skip detection and assume this source language code"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock collaborators instead of real services")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show detailed pipeline output")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let message = matches.get_one::<String>("message").unwrap();
    let channel = matches.get_one::<String>("channel").unwrap();
    let source = matches.get_one::<String>("source");
    let use_mock = matches.get_flag("mock");
    let verbose = matches.get_flag("verbose");

    if verbose {
        println!("📝 Message: \"{}\"", message);
        println!("📮 Channel: {}", channel);
        println!();
    }

    if use_mock {
        let detector = Arc::new(MockDetector::fixed(
            source.map(|s| s.as_str()).unwrap_or("en"),
        ));
        let translator = Arc::new(MockTranslator::new(MockMode::NoOp));
        let bus = Arc::new(RecordingEventBus::new());
        let queue = Arc::new(RecordingQueue::new());
        let config = mock_config();
        let processor = MessageProcessor::new(
            detector,
            translator,
            ChannelDispatcher::new(bus.clone(), queue.clone(), config),
        );

        let processed = processor
            .process(InboundEvent::new(message, channel))
            .await?;
        println!("{}", processed.message);

        if verbose {
            for (detail_type, payload) in bus.events() {
                println!("📤 event {} → {}", detail_type, serde_json::to_string(&payload)?);
            }
            for payload in queue.messages() {
                println!("📤 queue → {}", serde_json::to_string(&payload)?);
            }
        }
        return Ok(());
    }

    // Check for API key before building the real provider
    if env::var("GOOGLE_TRANSLATE_API_KEY").is_err() {
        eprintln!("❌ GOOGLE_TRANSLATE_API_KEY environment variable not set");
        eprintln!("   Set it with: export GOOGLE_TRANSLATE_API_KEY=your_api_key");
        eprintln!("   Or use --mock to run without external services");
        return Err("Missing API key".into());
    }

    let provider = Arc::new(GoogleTranslateProvider::from_env()?);
    let detector: Arc<dyn LanguageDetector> = match source {
        // An explicit source code replaces the detection call
        Some(code) => Arc::new(MockDetector::fixed(code)),
        None => provider.clone(),
    };
    let translator: Arc<dyn Translator> = provider;
    let config = RelayConfig::from_env()?;
    let processor =
        MessageProcessor::new(detector, translator, ChannelDispatcher::http(config));

    let processed = processor
        .process(InboundEvent::new(message, channel))
        .await?;

    if verbose {
        println!("✅ Dispatched to {}", processed.channel);
    }
    println!("{}", processed.message);

    Ok(())
}

/// Local settings for --mock runs; nothing leaves the process
fn mock_config() -> RelayConfig {
    RelayConfig {
        team_name: "local".to_string(),
        event_bus_name: "local-bus".to_string(),
        event_bus_endpoint: "http://localhost:0/events".to_string(),
        queue_url: "http://localhost:0/queue".to_string(),
        email: Some("local@example.com".to_string()),
        team_id: Some("local".to_string()),
    }
}
