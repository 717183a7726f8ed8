use anyhow::Result;
use clap::Parser;
use translate_rpc::languages::{language_name, AUTO};
use translate_rpc::translator::DEFAULT_DESTINATION;
use translate_rpc::{Config, Translator};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "translate-rpc")]
#[command(about = "Translate text through the translate web endpoint")]
struct CliArgs {
    /// Destination language code or name.
    #[arg(short, long, default_value = DEFAULT_DESTINATION)]
    dest: String,

    /// Source language code or name, or `auto` to detect it.
    #[arg(short, long, default_value = AUTO)]
    src: String,

    /// Only detect the language of the text.
    #[arg(long)]
    detect: bool,

    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,

    /// Text to translate.
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    text: Vec<String>,
}

/// `ko` -> `ko (korean)`; codes without a known name print bare.
fn language_label(code: &str) -> String {
    match language_name(code) {
        Some(name) => format!("{} ({})", code, name),
        None => code.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translate_rpc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let text = args.text.join(" ");

    let translator = match Config::from_env().and_then(Translator::new) {
        Ok(translator) => translator,
        Err(e) => {
            error!("Failed to initialize translator: {}", e);
            std::process::exit(1);
        }
    };

    if args.detect {
        let detected = translator.detect(&text).await?;
        info!("Detected language: {}", detected.language);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&detected)?);
        } else {
            println!("{}", language_label(&detected.language));
        }
        return Ok(());
    }

    let translated = translator.translate(&text, &args.dest, &args.src).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&translated)?);
    } else {
        println!(
            "[{}] {}",
            language_label(&translated.source),
            translated.origin_text
        );
        match &translated.pronunciation {
            Some(pronunciation) => println!(
                "    -> [{}] {} ({})",
                language_label(&translated.destination), translated.translated_text, pronunciation
            ),
            None => println!(
                "    -> [{}] {}",
                language_label(&translated.destination), translated.translated_text
            ),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::try_parse_from(["translate-rpc", "Hola", "mundo"]).unwrap();
        assert_eq!(args.dest, "en");
        assert_eq!(args.src, "auto");
        assert!(!args.detect);
        assert_eq!(args.text.join(" "), "Hola mundo");
    }

    #[test]
    fn test_language_label() {
        assert_eq!(language_label("ko"), "ko (korean)");
        assert_eq!(language_label("auto"), "auto");
    }

    #[test]
    fn test_cli_requires_text() {
        assert!(CliArgs::try_parse_from(["translate-rpc", "--dest", "ko"]).is_err());
    }

    #[test]
    fn test_cli_language_flags() {
        let args =
            CliArgs::try_parse_from(["translate-rpc", "-d", "ko", "-s", "fr", "--json", "Bonjour"])
                .unwrap();
        assert_eq!(args.dest, "ko");
        assert_eq!(args.src, "fr");
        assert!(args.json);
    }
}
