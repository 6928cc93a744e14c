use clap::{Args, Parser, Subcommand};
use sd_prompt_generator::prompt::{GenerationRequest, PromptGenerator, PromptSource};
use sd_prompt_generator::vocabulary::Category;
use sd_prompt_generator::{Config, OllamaClient, Vocabulary};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "promptctl", about = "CLI for the Stable Diffusion prompt generator", version)]
struct Cli {
    /// Override OLLAMA_URL
    #[arg(global = true, long)]
    ollama_url: Option<String>,

    /// Override OLLAMA_MODEL
    #[arg(global = true, long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Style, or "random"
    #[arg(long, default_value = "random")]
    style: String,
    /// Subject, or "random"
    #[arg(long, default_value = "random")]
    subject: String,
    /// Add an artist reference
    #[arg(long)]
    artist: bool,
    #[arg(long)]
    no_quality: bool,
    #[arg(long)]
    no_composition: bool,
    #[arg(long)]
    no_colors: bool,
    #[arg(long)]
    no_negative: bool,
    /// Skip the LLM and compose locally
    #[arg(long)]
    offline: bool,
    /// Print the full JSON result instead of the combined prompt
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn to_request(&self) -> GenerationRequest {
        GenerationRequest {
            style: self.style.clone(),
            subject: self.subject.clone(),
            include_artist: self.artist,
            include_quality: !self.no_quality,
            include_composition: !self.no_composition,
            include_colors: !self.no_colors,
            include_negative: !self.no_negative,
        }
    }

    /// The LLM arm is used only when the config enables it and `--offline` is absent.
    fn prompt_source(&self, conf: &Config, client: OllamaClient) -> Option<Arc<dyn PromptSource>> {
        if conf.use_llm && !self.offline {
            Some(Arc::new(client))
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a prompt (LLM first, random composition as fallback)
    Generate(GenerateArgs),
    /// List available styles
    Styles,
    /// List available subjects
    Subjects,
    /// List terms in a vocabulary category, e.g. colors, negative_terms
    Vocabulary {
        category: String,
    },
    /// Check whether the inference endpoint is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut conf = Config::new()?;
    if let Some(url) = cli.ollama_url {
        conf.ollama_url = url;
    }
    if let Some(model) = cli.model {
        conf.ollama_model = model;
    }

    let vocabulary = match &conf.vocabulary_path {
        Some(path) => Vocabulary::load_from_file(path).await?,
        None => Vocabulary::builtin(),
    };
    let client = OllamaClient::new(conf.ollama_url.clone(), conf.ollama_model.clone())
        .with_timeout(conf.ollama_timeout);

    match cli.command {
        Commands::Generate(args) => {
            let source = args.prompt_source(&conf, client);
            let generator = PromptGenerator::new(Arc::new(vocabulary), source);
            let request = args.to_request();
            let result = generator.generate_result(&request).await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.full_prompt);
            }
            Ok(())
        }
        Commands::Styles => {
            for s in vocabulary.terms(Category::Styles) { println!("{}", s); }
            Ok(())
        }
        Commands::Subjects => {
            for s in vocabulary.terms(Category::Subjects) { println!("{}", s); }
            Ok(())
        }
        Commands::Vocabulary { category } => match vocabulary.get(&category) {
            Some(terms) => {
                for t in terms { println!("{}", t); }
                Ok(())
            }
            None => {
                let known: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
                eprintln!("Unknown category '{}'. Known: {}", category, known.join(", "));
                std::process::exit(2);
            }
        },
        Commands::Health => {
            let status = client.probe().await;
            println!("{} ({}, model {})", status.as_str(), client.base_url(), client.model());
            Ok(())
        }
    }
}
