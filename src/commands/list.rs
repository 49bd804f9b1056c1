use crate::context::AppContext;
use crate::error::AppResult;
use crate::profile::DeviceIndex;

pub fn run(ctx: &AppContext) -> AppResult<()> {
    let devices = ctx.resolver.get_devices();
    if devices.is_empty() {
        return ctx.output.emit(&["0 devices".to_string()], &devices);
    }

    ctx.output.emit(&format_rows(&devices), &devices)
}

fn format_rows(devices: &DeviceIndex) -> Vec<String> {
    let width = devices.keys().map(|name| name.len()).max().unwrap_or(0);

    devices
        .iter()
        .map(|(name, display_name)| {
            let display_name = if display_name.is_empty() {
                "(unnamed)"
            } else {
                display_name.as_str()
            };
            format!("{name:<width$}  {display_name}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_display_names() {
        let devices = DeviceIndex::from([
            ("device-a.properties".to_string(), "A".to_string()),
            ("device-bacon.properties".to_string(), "OnePlus One".to_string()),
        ]);

        assert_eq!(
            format_rows(&devices),
            [
                "device-a.properties      A",
                "device-bacon.properties  OnePlus One",
            ]
        );
    }

    #[test]
    fn marks_missing_display_names() {
        let devices = DeviceIndex::from([("device-x.properties".to_string(), String::new())]);
        assert_eq!(format_rows(&devices), ["device-x.properties  (unnamed)"]);
    }
}
