use skycast_core::{FormattedCurrent, FormattedDay, ThemeName, View};

/// Terminal rendering of the widget's three presentation states.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl View for ConsoleView {
    fn show_loading(&mut self) {
        println!("Fetching weather...");
    }

    fn show_populated(
        &mut self,
        current: &FormattedCurrent,
        forecast: &[FormattedDay],
        theme: ThemeName,
    ) {
        println!();
        println!("{} ({theme})", current.location);
        println!("  {}", current.conditions);
        println!(
            "  Temperature: {} (feels like {})",
            current.temperature, current.feels_like
        );
        println!(
            "  Humidity: {}   UV index: {}   Wind: {}",
            current.humidity, current.uv_index, current.wind_speed
        );
        println!();
        println!("Next 3 days:");
        for day in forecast {
            println!(
                "  {}: {} / {}  {}",
                day.date, day.temp_max, day.temp_min, day.conditions
            );
            println!("      sunrise {}  sunset {}", day.sunrise, day.sunset);
        }
        println!();
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}
