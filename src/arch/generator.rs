use tracing::{info, info_span};

use super::assembler::{assemble_segment, sketch_station, ArchSegment, StationProfiles};
use super::solver::{solve_apex, solve_stations, StationSample};
use crate::config::ArchConfig;
use crate::error::Result;
use crate::kernel::{ComponentId, GeometryKernel};
use crate::math::Point3;

/// Everything one generation run produced.
#[derive(Debug, Clone)]
pub struct ArchAssembly {
    pub name: String,
    pub component: ComponentId,
    /// The apex cap: station 0, sketched but never lofted on its own.
    pub apex: StationProfiles,
    /// Solved stations 1..=N in table order.
    pub stations: Vec<StationSample>,
    /// One section per station.
    pub segments: Vec<ArchSegment>,
}

impl ArchAssembly {
    /// Section triangle vertices, apex first, in sketch order.
    #[must_use]
    pub fn vertex_sequence(&self) -> Vec<Point3> {
        std::iter::once(&self.apex.sample)
            .chain(&self.stations)
            .flat_map(|s| s.triangle.vertices())
            .collect()
    }
}

/// Builds the whole arch in `kernel`, replacing any earlier output of the same name.
///
/// Stations are solved in parallel; sections are then assembled strictly in
/// order, each from the previous station's profiles.
///
/// # Errors
///
/// Returns a configuration error before touching the kernel, or the first
/// error raised while assembling. A failed run is not rolled back.
pub fn generate<K: GeometryKernel>(kernel: &mut K, config: &ArchConfig) -> Result<ArchAssembly> {
    config.validate()?;
    let constants = config.physical_constants()?;
    let table = config.station_table();
    let _span = info_span!("generate", name = %config.name, stations = table.len()).entered();

    let removed = kernel.remove_component(&config.name)?;
    if removed > 0 {
        info!(removed, "replaced previous output");
    }
    let component = kernel.create_component(None, &config.name)?;

    let samples = solve_stations(table, &constants);
    let apex = sketch_station(kernel, component, solve_apex(&constants), &config.margins, true)?;

    let (segments, _) = samples.iter().enumerate().try_fold(
        (Vec::with_capacity(samples.len()), apex.clone()),
        |(mut segments, prev), (i, sample)| -> Result<(Vec<ArchSegment>, StationProfiles)> {
            let curr = sketch_station(kernel, component, *sample, &config.margins, false)?;
            segments.push(assemble_segment(
                kernel,
                component,
                &prev,
                &curr,
                i + 1,
                &config.features,
            )?);
            Ok((segments, curr))
        },
    )?;

    info!(segments = segments.len(), "arch generated");

    Ok(ArchAssembly {
        name: config.name.clone(),
        component,
        apex,
        stations: samples,
        segments,
    })
}
