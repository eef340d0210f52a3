use settings::Settings;
use skill::AwaySkill;

mod adapter;
mod core;
pub mod port;
mod settings;
mod skill;

#[tokio::main(flavor = "multi_thread")]
pub async fn main() {
    let settings = Settings::new().expect("Error reading configuration");

    settings.monitoring.init().expect("Error initializing monitoring");

    let nest_client = settings.nest.new_client().expect("Error initializing Nest REST client");
    let skill = AwaySkill::new(nest_client);

    tracing::info!("Starting Nest away skill against {}", settings.nest.url);

    settings
        .http_server
        .run_server(move || vec![adapter::alexa::new_web_service(skill.clone())])
        .await
        .expect("HTTP server execution failed");
}
