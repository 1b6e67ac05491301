use keyconf::{init_logging, render_text, App, AppConfig, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    let mut json = false;
    let mut route = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--version" => {
                println!("keyconf {} ({})", VERSION, BUILD_DATE);
                return Ok(());
            }
            _ => route = Some(arg),
        }
    }

    let config = AppConfig::load_or_default();
    init_logging(config.log_filter.as_deref())?;
    tracing::info!(version = VERSION, build_date = BUILD_DATE, "Starting KeyConf");

    let mut app = App::boot_from_config(&config)?;
    if let Some(route) = route {
        app.shell_mut().navigate(&route);
    }

    let frame = app.shell().frame();
    if json {
        println!("{}", frame.to_json()?);
    } else {
        print!("{}", render_text(&frame));
    }

    Ok(())
}
