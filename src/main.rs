use clap::Parser;
use quiz_runner::{CliArgs, Quiz, QuizError, Settings, logging};

fn run(args: CliArgs) -> Result<(), QuizError> {
    let settings = Settings::resolve(&args)?;
    logging::init(&settings.log_file)?;
    tracing::info!(?settings, "starting");

    let quiz = Quiz::load(&settings)?;
    quiz.run()
}

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
