//! Environment source: `COLAB_<SECTION>__<KEY>`, e.g. `COLAB_API__BASE_URL`.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("COLAB")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
