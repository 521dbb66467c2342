mod cli;
mod config;
mod logging;
mod render;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Render(args) => {
            logging::setup_logging(args.verbosity);
            render::run(args)
        }
        cli::Command::Demo(args) => {
            logging::setup_logging(args.verbosity);
            render::demo(args)
        }
    }
}
