//! Light controller port — push a color setting to a set of bulbs.

use std::future::Future;

use weatherhue_domain::error::WeatherHueError;
use weatherhue_domain::table::ColorSetting;

/// Drives a set of named bulbs behind a bridge device.
///
/// Implementations connect lazily on the first [`apply`](Self::apply) and
/// keep that connection for the lifetime of the controller.
pub trait LightController {
    /// Set every bulb in `bulbs` to `setting`, one after another.
    fn apply(
        &mut self,
        setting: ColorSetting,
        bulbs: &[String],
    ) -> impl Future<Output = Result<(), WeatherHueError>> + Send;
}
