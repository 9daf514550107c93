//! Environment source: `CHANGEGEN__CHANGELOG__FILE_NAME=HISTORY.md` sets
//! `changelog.file_name`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CHANGEGEN")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
