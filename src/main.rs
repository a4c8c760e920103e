// SPDX-License-Identifier: MPL-2.0
use gallery_shell::app::{self, Flags};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: gallery_shell [OPTIONS]

Options:
  --config-dir DIR   Directory holding settings.toml
  --data-dir DIR     Directory holding state.cbor
  --secure on|off    Persist secure mode before the screen starts
  --rotate           Toggle the requested orientation once
  --size WxH         Window size in logical pixels (default 412x915)
  -h, --help         Print this help";

fn parse_flags() -> Result<Flags, String> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        std::process::exit(0);
    }

    let flags = Flags {
        config_dir: args
            .opt_value_from_str("--config-dir")
            .map_err(|e| e.to_string())?,
        data_dir: args
            .opt_value_from_str("--data-dir")
            .map_err(|e| e.to_string())?,
        secure: args
            .opt_value_from_fn("--secure", app::parse_switch)
            .map_err(|e| e.to_string())?,
        rotate: args.contains("--rotate"),
        size: args
            .opt_value_from_fn("--size", app::parse_size)
            .map_err(|e| e.to_string())?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(format!("unexpected arguments: {rest:?}"));
    }
    Ok(flags)
}

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gallery_shell=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    match app::run(flags).await {
        Ok(report) => {
            println!("secure mode:       {}", report.secure_mode);
            println!("surface secure:    {}", report.surface_secure);
            println!("orientation:       {:?}", report.orientation);
            println!(
                "size class:        {:?} x {:?}",
                report.size_class.width, report.size_class.height
            );
            println!("bottom bar:        {}", report.shows_bottom_bar);
            println!("dark bar content:  {}", report.system_bars.dark_content);
            for warning in &report.warnings {
                eprintln!("warning: {warning}");
            }
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
