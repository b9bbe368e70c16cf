use clap::Parser;
use storyshelf_cli::{CliArgs, StoryshelfCli};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let result = match StoryshelfCli::from_args("storyshelf", &args) {
        Ok(cli) => cli.run(args).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
