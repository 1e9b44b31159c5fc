// SPDX-License-Identifier: MPL-2.0
use skin_lens::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
SkinLens - skin-condition classification client

USAGE:
  skin_lens [OPTIONS] [IMAGE]

OPTIONS:
  --lang <CODE>         UI language (id, en)
  --server <URL>        Backend base URL
  --config-dir <PATH>   Directory holding settings.toml
  -h, --help            Print this help
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skin_lens=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(error) => {
            eprintln!("{}\n\n{}", error, HELP);
            std::process::exit(2);
        }
    };

    paths::init_cli_override(flags.config_dir.clone());
    app::run(flags)
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let lang = args.opt_value_from_str("--lang")?;
    let server = args.opt_value_from_str("--server")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Flags {
        lang,
        server,
        file_path,
        config_dir,
    })
}
