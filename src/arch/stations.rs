use crate::error::ConfigError;

/// Horizontal offsets (feet from the centerline) of the reference arch's
/// section boundaries, apex excluded.
pub const GATEWAY_STATIONS: [f64; 71] = [
    7.736, 15.4528, 23.1312, 30.7496, 38.2872, 45.7256, 53.0456, 60.228, 67.2624, 74.1376,
    80.8448, 87.3768, 93.7677, 100.0101, 106.098, 112.1331, 118.103, 123.9978, 129.8074,
    135.5237, 141.1407, 146.6567, 152.0684, 157.3727, 162.5677, 167.6533, 172.6304, 177.5,
    182.263, 186.9213, 191.4791, 195.945, 200.2592, 204.4297, 208.4644, 212.3717, 216.159,
    219.8329, 223.3986, 226.8496, 230.1923, 233.4326, 236.5765, 239.6292, 242.5954, 245.4796,
    248.2861, 251.0188, 253.6814, 256.2773, 258.8096, 261.2812, 263.6952, 266.0538, 268.3595,
    270.6143, 272.8207, 274.9804, 277.0955, 279.1677, 281.1988, 283.1902, 285.1434, 287.0597,
    288.9406, 290.7872, 292.6007, 294.3824, 296.1334, 297.8546, 299.5458,
];

/// Checks that a station table is non-empty, finite, positive, and strictly increasing.
///
/// # Errors
///
/// Returns `ConfigError::Stations` describing the first offending entry.
pub fn validate_stations(stations: &[f64]) -> Result<(), ConfigError> {
    if stations.is_empty() {
        return Err(ConfigError::Stations("station table is empty".into()));
    }
    let mut previous = 0.0;
    for (i, &x) in stations.iter().enumerate() {
        if !x.is_finite() || x <= 0.0 {
            return Err(ConfigError::Stations(format!(
                "station {} must be finite and positive, got {x}",
                i + 1
            )));
        }
        if x <= previous {
            return Err(ConfigError::Stations(format!(
                "station {} ({x}) does not increase past {previous}",
                i + 1
            )));
        }
        previous = x;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_table_is_valid() {
        assert!(validate_stations(&GATEWAY_STATIONS).is_ok());
        assert_eq!(GATEWAY_STATIONS.len(), 71);
    }

    #[test]
    fn rejects_empty_and_unordered_tables() {
        assert!(validate_stations(&[]).is_err());
        assert!(validate_stations(&[1.0, 3.0, 2.0]).is_err());
        assert!(validate_stations(&[1.0, 1.0]).is_err());
        assert!(validate_stations(&[0.0, 1.0]).is_err());
        assert!(validate_stations(&[1.0, f64::INFINITY]).is_err());
    }
}
