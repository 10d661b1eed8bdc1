use chat_service::api;
use chat_service::common::init;
use chat_service::settings::AppSettings;
use chat_service::workers::crons;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::get();
    init::initialize_logging(settings);
    match settings.app_component.as_str() {
        "api" => api::serve(settings).await,
        "scheduler" => {
            crons::scheduler_cron::serve(settings).await?;
            Ok(())
        }
        _ => panic!("Unknown app component"),
    }
}
