use nestview::io::ext_repr::{ExtBinnedResponse, ExtConfiguration};
use serde::{Deserialize, Serialize};

use crate::config::CliConfig;

/// Content of a solution file: the submitted job, the placement and the configuration used.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NestOutput {
    #[serde(flatten)]
    pub configuration: ExtConfiguration,
    pub result: ExtBinnedResponse,
    pub config: CliConfig,
}
