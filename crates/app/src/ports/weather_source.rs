//! Weather source port — fetch the next forecast period for a location.

use std::future::Future;

use weatherhue_domain::error::WeatherHueError;
use weatherhue_domain::forecast::Forecast;

/// Produces the forecast for the period coming up next.
///
/// Implementations perform exactly one network request per call and keep no
/// state between calls.
pub trait WeatherSource {
    /// Identifier of the location this source fetches for (e.g. a city id).
    fn location(&self) -> &str;

    /// Fetch the forecast and pick the first period's primary condition.
    ///
    /// Fails with [`WeatherHueError::Network`] when the request cannot
    /// complete and [`WeatherHueError::Parse`] when the response is not
    /// well-formed.
    fn fetch(&self) -> impl Future<Output = Result<Forecast, WeatherHueError>> + Send;
}
