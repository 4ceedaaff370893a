use tracing::debug;

use crate::core::mapper::CoordinateMapper;
use crate::core::types::{Point, Series};
use crate::error::{ChartError, ChartResult};

/// Drops gaps and consecutive points that land on the same x pixel.
///
/// A point is kept when its y is present and its mapped x differs from the
/// previously kept point. Only x is compared; points sharing a pixel column
/// keep the first sample regardless of y. Input series are left untouched.
pub fn normalize_series(
    series: &[Series],
    mapper: &CoordinateMapper<'_>,
) -> ChartResult<Vec<Series>> {
    series
        .iter()
        .map(|item| {
            let mut kept = Vec::with_capacity(item.data.len());
            let mut last_x: Option<f64> = None;
            for point in &item.data {
                if point.y.is_none() {
                    continue;
                }
                let x = mapper.map_x(point)?;
                if last_x == Some(x) {
                    continue;
                }
                last_x = Some(x);
                kept.push(Point {
                    y0: 0.0,
                    ..point.clone()
                });
            }

            debug!(
                series = %item.name,
                original_count = item.data.len(),
                kept_count = kept.len(),
                "normalized series"
            );
            Ok(Series::new(item.name.clone(), kept))
        })
        .collect()
}

/// Zero-offset stack layout in declaration order.
///
/// Each point's `y0` becomes the sum of `y` of all earlier series at the same
/// index. Series must share the same x sequence; misaligned inputs are
/// rejected rather than realigned.
pub fn stack_series(mut series: Vec<Series>) -> ChartResult<Vec<Series>> {
    let Some(first) = series.first() else {
        return Ok(series);
    };
    let reference: Vec<_> = first.data.iter().map(|point| point.x.clone()).collect();

    for item in &series {
        if item.data.len() != reference.len() {
            return Err(ChartError::InvalidData(format!(
                "cannot stack series `{}`: {} points, expected {}",
                item.name,
                item.data.len(),
                reference.len()
            )));
        }
        if let Some((index, point)) = item
            .data
            .iter()
            .enumerate()
            .find(|(index, point)| point.x != reference[*index])
        {
            return Err(ChartError::InvalidData(format!(
                "cannot stack series `{}`: x={} at index {index} does not match x={}",
                item.name, point.x, reference[index]
            )));
        }
    }

    let mut baseline = vec![0.0; reference.len()];
    for item in &mut series {
        for (point, offset) in item.data.iter_mut().zip(baseline.iter_mut()) {
            point.y0 = *offset;
            *offset += point.y.ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "cannot stack gap point of `{}` at x={}",
                    item.name, point.x
                ))
            })?;
        }
    }

    debug!(
        series_count = series.len(),
        points_per_series = reference.len(),
        "stacked series"
    );
    Ok(series)
}
