use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::BigInt64Array;

pub mod clipper;
pub mod constants;
pub mod geometry;
pub mod utils;

use crate::clipper::clipper::Clipper;
use crate::clipper::clipper_config::ClipperConfig;
use crate::clipper::clipping_helper;
use crate::clipper::enums::ClipType;
use crate::clipper::utils as clipper_utils;
use crate::constants::PACKED_HEADER_SIZE;
use crate::geometry::point::Point;
use crate::geometry::polygon::{Polygon, PolygonPath};
use crate::utils::number::Number;
use crate::utils::wasm_logger;

fn to_big_int_array(values: &[i64]) -> BigInt64Array {
    let out = BigInt64Array::new_with_length(values.len() as u32);
    out.copy_from(values);
    out
}

fn from_i64_mem_seg(mem_seg: &[i64]) -> Vec<Point> {
    mem_seg
        .chunks_exact(2)
        .map(|chunk| Point::new(chunk[0], chunk[1]))
        .collect()
}

fn pack_polygon_to_i64(polygon: &[Point]) -> Vec<i64> {
    let mut out = Vec::with_capacity(polygon.len() * 2);
    for p in polygon {
        out.push(p.x);
        out.push(p.y);
    }
    out
}

/// Reads a packed path buffer: `[count, size_0, .., size_n, x0, y0, ...]`.
/// A negative size marks an open polyline of that many points. Truncated
/// buffers yield the polygons that are complete.
pub fn unpack_path(buffer: &[i64]) -> PolygonPath {
    let Some(&count) = buffer.first() else {
        return PolygonPath::new();
    };

    let count = count.max(0) as usize;
    let header_len = PACKED_HEADER_SIZE.saturating_add(count);

    if buffer.len() < header_len {
        warn!(count, len = buffer.len(), "packed path header is truncated");
        return PolygonPath::new();
    }

    let mut result = PolygonPath::new();
    let mut offset = header_len;

    for &size in buffer[PACKED_HEADER_SIZE..header_len].iter() {
        let end = offset.saturating_add((size.unsigned_abs() as usize).saturating_mul(2));

        let Some(data) = buffer.get(offset..end) else {
            warn!(size, offset, "packed path data is truncated");
            break;
        };

        let points = from_i64_mem_seg(data);

        result.push(if size < 0 {
            Polygon::open(points)
        } else {
            Polygon::from_points(points)
        });

        offset = end;
    }

    result
}

/// Inverse of [`unpack_path`].
pub fn pack_path(path: &PolygonPath) -> Vec<i64> {
    let total_points: usize = path.iter().map(|polygon| polygon.len()).sum();
    let header_len = PACKED_HEADER_SIZE + path.len();
    let mut out = Vec::with_capacity(header_len + total_points * 2);

    out.push(path.len() as i64);

    for polygon in path.iter() {
        let size = polygon.len() as i64;
        out.push(if polygon.is_open { -size } else { size });
    }

    for polygon in path.iter() {
        out.extend(pack_polygon_to_i64(polygon));
    }

    out
}

/// Clips two packed paths. `config` is a packed [`ClipperConfig`]. An unknown
/// clip type or a failed clip gives an empty packed path.
pub fn clip_polygons_inner(subject: &[i64], clip: &[i64], clip_type: u8, config: u32) -> Vec<i64> {
    let Some(clip_type) = ClipType::from_u8(clip_type) else {
        warn!(clip_type, "unknown clip type");
        return pack_path(&PolygonPath::new());
    };

    let clipper = Clipper::with_config(ClipperConfig::deserialize(config));
    let mut solution = PolygonPath::new();

    clipper.execute(clip_type, &unpack_path(subject), &unpack_path(clip), &mut solution);

    pack_path(&solution)
}

#[wasm_bindgen]
pub fn clip_polygons_wasm(subject: &[i64], clip: &[i64], clip_type: u8, config: u32) -> BigInt64Array {
    to_big_int_array(&clip_polygons_inner(subject, clip, clip_type, config))
}

pub fn simplify_polygon_inner(buffer: &[i64]) -> Vec<i64> {
    let mut solution = PolygonPath::new();

    clipping_helper::simplify_polygon(&unpack_path(buffer), &mut solution);

    pack_path(&solution)
}

#[wasm_bindgen]
pub fn simplify_polygon_wasm(buffer: &[i64]) -> BigInt64Array {
    to_big_int_array(&simplify_polygon_inner(buffer))
}

#[wasm_bindgen]
pub fn contains_wasm(subject: &[i64], candidate: &[i64]) -> bool {
    clipping_helper::contains(&unpack_path(subject), &unpack_path(candidate))
}

/// Cleans one flat `[x0, y0, x1, y1, ...]` polygon.
pub fn clean_polygon_inner(buffer: &[i64], distance: f64) -> Vec<i64> {
    let polygon = from_i64_mem_seg(buffer);
    let cleaned = clipper_utils::clean_polygon(&polygon, distance);

    pack_polygon_to_i64(&cleaned)
}

#[wasm_bindgen]
pub fn clean_polygon_wasm(buffer: &[i64], distance: f64) -> BigInt64Array {
    to_big_int_array(&clean_polygon_inner(buffer, distance))
}

#[wasm_bindgen]
pub fn polygon_area_wasm(points: &[i64]) -> f64 {
    Number::polygon_area(points)
}

#[wasm_bindgen]
pub fn init_logging_wasm(level: u8) -> bool {
    wasm_logger::init_console_logging(level)
}
