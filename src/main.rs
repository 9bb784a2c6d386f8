use cosmic::app::Settings;
use cosmic::iced::Limits;

mod application;
mod components;
mod localize;
mod message;
mod pages;

use docket::config;
use docket::core;
use docket::state;
use docket::store;
use docket::view;

use application::{Docket, Flags};
use config::DocketConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cosmic_config = DocketConfig::handler()?;
    let config = DocketConfig::load(&cosmic_config);

    // Journal when available (`journalctl --user -t docket -f`), stderr otherwise.
    docket::logging::init("docket", config.debug_logging)?;

    localize::localize();

    let mut settings = Settings::default();
    settings = settings.size_limits(Limits::NONE.min_width(480.0).min_height(360.0));

    cosmic::app::run::<Docket>(settings, Flags { cosmic_config, config })?;

    Ok(())
}
