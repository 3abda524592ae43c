use std::sync::Arc;

use onest_weather::WeatherClient;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub weather: Arc<WeatherClient>,
}

impl AppState {
    pub fn new(weather: WeatherClient) -> Self {
        Self {
            weather: Arc::new(weather),
        }
    }
}
