use std::io::Read;
use std::path::Path;

use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};

use crate::config::HistoryFallback;
use crate::error::{PredictionError, Result};
use crate::shared_data::{HistoricalRecord, ImputedFeatures, NumericFeature};

/// Areas and roads the synthetic history cycles through.
const SYNTHETIC_LOCATIONS: [(&str, &str); 3] = [
    ("Indiranagar", "100 Feet Road"),
    ("Koramangala", "5th Block"),
    ("Whitefield", "ITPL Main Road"),
];

/// Past observations used to impute the numerical features of a query.
#[derive(Debug, Clone, Default)]
pub struct HistoricalData {
    records: Vec<HistoricalRecord>,
    synthetic: bool,
}

impl HistoricalData {
    pub fn from_records(records: Vec<HistoricalRecord>) -> Self {
        Self {
            records,
            synthetic: false,
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let rdr = csv_builder().from_reader(reader);
        Ok(Self::from_records(read_records(rdr)?))
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rdr = csv_builder().from_path(path)?;
        let records = read_records(rdr)?;
        log::debug!("Read {} historical rows from {}", records.len(), path.display());
        Ok(Self::from_records(records))
    }

    /// Generates `rows` plausible observations for the three sample areas.
    pub fn synthetic<R: Rng + ?Sized>(rng: &mut R, rows: usize) -> Result<Self> {
        let volume = normal(1500.0, 300.0)?;
        let speed = normal(25.0, 5.0)?;
        let capacity = normal(75.0, 15.0)?;
        let pedestrians = normal(50.0, 10.0)?;
        let incidents = Poisson::new(2.0)
            .map_err(|e| PredictionError::SyntheticHistory(e.to_string()))?;

        let records = (0..rows)
            .map(|i| {
                let (area, road) = SYNTHETIC_LOCATIONS[i % SYNTHETIC_LOCATIONS.len()];
                HistoricalRecord {
                    area_name: area.to_string(),
                    road_name: road.to_string(),
                    traffic_volume: Some(volume.sample(rng)),
                    average_speed: Some(speed.sample(rng)),
                    capacity_utilization: Some(capacity.sample(rng)),
                    incident_reports: Some(incidents.sample(rng)),
                    pedestrian_count: Some(pedestrians.sample(rng)),
                }
            })
            .collect();

        Ok(Self {
            records,
            synthetic: true,
        })
    }

    /// Reads the CSV at `path`, applying `fallback` when it is missing or
    /// unreadable.
    pub fn load<R: Rng + ?Sized>(
        path: &Path,
        fallback: HistoryFallback,
        rng: &mut R,
        synthetic_rows: usize,
    ) -> Result<Self> {
        let loaded = if path.is_file() {
            Self::from_csv_path(path)
        } else {
            Err(PredictionError::MissingHistory(path.to_path_buf()))
        };

        match (loaded, fallback) {
            (Ok(history), _) => Ok(history),
            (Err(e), HistoryFallback::Fail) => Err(e),
            (Err(e), HistoryFallback::Synthetic) => {
                log::warn!("Could not load historical data: {}; using synthetic rows", e);
                Self::synthetic(rng, synthetic_rows)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    /// Mean of `feature` over the rows accepted by `filter`, skipping blank
    /// cells. `None` when no row contributes a value.
    pub fn average_for<F>(&self, feature: NumericFeature, filter: F) -> Option<f64>
    where
        F: Fn(&HistoricalRecord) -> bool,
    {
        let (sum, count) = self
            .records
            .iter()
            .filter(|record| filter(record))
            .filter_map(|record| feature.value_in(record))
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Imputes every numerical feature from the area/road group, then the
    /// area group, then the built-in default.
    pub fn impute(&self, area_name: &str, road_name: &str) -> ImputedFeatures {
        let mut features = ImputedFeatures::defaults();
        for feature in NumericFeature::ALL {
            let by_location = self.average_for(feature, |r| {
                r.area_name == area_name && r.road_name == road_name
            });
            let value = match by_location {
                Some(value) => value,
                None => match self.average_for(feature, |r| r.area_name == area_name) {
                    Some(value) => {
                        log::debug!(
                            "{:?}: no rows for {} / {}, using area average",
                            feature,
                            area_name,
                            road_name
                        );
                        value
                    }
                    None => {
                        log::debug!("{:?}: no rows for {}, using default", feature, area_name);
                        feature.default_value()
                    }
                },
            };
            features.set(feature, value);
        }
        features
    }
}

/// Short or long rows are read as far as they go; missing cells are blanks.
fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.flexible(true);
    builder
}

/// Collects every usable row. A row that cannot be deserialized (for
/// instance one without an area or road) is skipped with a warning; I/O and
/// encoding errors still abort the read.
fn read_records<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<HistoricalRecord>> {
    let mut records = Vec::new();
    for result in rdr.deserialize::<HistoricalRecord>() {
        match result {
            Ok(record) => records.push(record),
            Err(e)
                if matches!(
                    e.kind(),
                    csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
                ) =>
            {
                log::warn!("Skipping historical row: {}", e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(records)
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| PredictionError::SyntheticHistory(e.to_string()))
}
