pub mod config;
pub mod form;
pub mod responses;

pub use config::{ConfigCommands, handle_config_command};
pub use form::{FormCommands, handle_form_command};
pub use responses::{ResponsesCommands, handle_responses_command};
