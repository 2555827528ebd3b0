//! Run output: ASCII grid maps and CSV tables
//!
//! All writers take any [`Write`]; the binary wraps files in a `BufWriter`.
//! Maps are written top row first, so row `0` of the file is `y = height - 1`.

use super::ascii_grid::AsciiGridHeader;
use crate::grid::Landscape;
use crate::simulation::{FireSpreadEngine, WeatherRecord};
use rustc_hash::FxHashMap;
use std::io::{self, Write};

/// `burn_map3.asc` for base `burn_map`, index 3 and extension `asc`
pub fn numbered_file_name(base: &str, index: usize, extension: &str) -> String {
    format!("{base}{index}.{extension}")
}

fn write_map<L, W, F>(landscape: &L, out: &mut W, code: F) -> io::Result<()>
where
    L: Landscape + ?Sized,
    W: Write,
    F: Fn(usize, usize) -> u8,
{
    AsciiGridHeader::new(landscape.width(), landscape.height(), landscape.cell_size())
        .write_to(out)?;
    for y in (0..landscape.height()).rev() {
        let row: Vec<String> = (0..landscape.width())
            .map(|x| code(x, y).to_string())
            .collect();
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

/// Cell states as an ASCII grid (0 unburned, 1 burning, 2 burned out)
///
/// # Errors
/// Propagates write failures.
pub fn write_burn_map<L, W>(landscape: &L, out: &mut W) -> io::Result<()>
where
    L: Landscape + ?Sized,
    W: Write,
{
    write_map(landscape, out, |x, y| landscape.cell(x, y).state.code())
}

/// Vegetation types as an ASCII grid (0 grass, 1 non-flammable)
///
/// # Errors
/// Propagates write failures.
pub fn write_vegetation_map<L, W>(landscape: &L, out: &mut W) -> io::Result<()>
where
    L: Landscape + ?Sized,
    W: Write,
{
    write_map(landscape, out, |x, y| landscape.cell(x, y).vegetation.code())
}

/// One `x,y,type,live,dead` row per cell
///
/// # Errors
/// Propagates write failures.
pub fn write_vegetation_csv<L, W>(landscape: &L, out: &mut W) -> io::Result<()>
where
    L: Landscape + ?Sized,
    W: Write,
{
    writeln!(out, "x,y,type,live,dead")?;
    for y in 0..landscape.height() {
        for x in 0..landscape.width() {
            let cell = landscape.cell(x, y);
            writeln!(
                out,
                "{},{},{},{},{}",
                x,
                y,
                cell.vegetation.code(),
                cell.live_biomass,
                cell.dead_biomass
            )?;
        }
    }
    Ok(())
}

/// One `x,y,state,intensity` row per cell
///
/// Intensity is the mean fireline intensity of burning cells and 0 elsewhere.
///
/// # Errors
/// Propagates write failures.
pub fn write_burn_data_csv<L, W>(
    landscape: &L,
    engine: &FireSpreadEngine,
    out: &mut W,
) -> io::Result<()>
where
    L: Landscape + ?Sized,
    W: Write,
{
    let intensities: FxHashMap<(usize, usize), f32> = engine
        .burning_cells()
        .map(|(x, y, intensity)| ((x, y), intensity))
        .collect();

    writeln!(out, "x,y,state,intensity")?;
    for y in 0..landscape.height() {
        for x in 0..landscape.width() {
            let intensity = intensities.get(&(x, y)).copied().unwrap_or(0.0);
            writeln!(
                out,
                "{},{},{},{:.1}",
                x,
                y,
                landscape.cell(x, y).state.code(),
                intensity
            )?;
        }
    }
    Ok(())
}

/// One row per weather query: hours of burning, T, RH, wind speed, wind octant
///
/// # Errors
/// Propagates write failures.
pub fn write_weather_csv<W: Write>(log: &[WeatherRecord], out: &mut W) -> io::Result<()> {
    writeln!(out, "t, temperature, relHumidity, windSpeed, windDirection")?;
    for record in log {
        let snapshot = &record.snapshot;
        writeln!(
            out,
            "{},{},{},{},{}",
            record.hours,
            snapshot.temperature.value(),
            snapshot.relative_humidity.value(),
            snapshot.wind_speed.value(),
            snapshot.wind_direction.index()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Cell, CellState, WeatherSnapshot};
    use crate::core_types::{Celsius, MetersPerSecond, Octant, Percent};
    use crate::grid::GridLandscape;
    use crate::io::ascii_grid::AsciiGrid;

    fn small_landscape() -> GridLandscape {
        let mut landscape = GridLandscape::uniform(3, 2, 30.0, Cell::grass(400.0, 600.0)).unwrap();
        *landscape.cell_mut(0, 1) = Cell::non_flammable();
        landscape.cell_mut(2, 0).state = CellState::BurnedOut;
        landscape
    }

    fn written<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(write: F) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn burn_map_is_written_top_row_first() {
        let landscape = small_landscape();
        let text = written(|out| write_burn_map(&landscape, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NCOLS 3");
        assert_eq!(lines[1], "NROWS 2");
        assert_eq!(lines[4], "CELLSIZE 30");
        assert_eq!(lines[5], "NODATA_VALUE -9999");
        assert_eq!(&lines[6..], &["0 0 0", "0 0 2"]);
    }

    #[test]
    fn maps_read_back_as_grids() {
        let landscape = small_landscape();
        let text = written(|out| write_vegetation_map(&landscape, out));
        let grid = AsciiGrid::parse(&text).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.header.cell_size, Some(30.0));
        assert_eq!(grid.values, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn vegetation_csv_lists_every_cell() {
        let landscape = small_landscape();
        let text = written(|out| write_vegetation_csv(&landscape, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "x,y,type,live,dead");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "0,0,0,400,600");
        assert_eq!(lines[4], "0,1,1,0,0");
    }

    #[test]
    fn burn_data_has_zero_intensity_without_fire() {
        let landscape = small_landscape();
        let engine = FireSpreadEngine::default();
        let text = written(|out| write_burn_data_csv(&landscape, &engine, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "x,y,state,intensity");
        assert_eq!(lines[3], "2,0,2,0.0");
    }

    #[test]
    fn weather_rows_follow_the_log() {
        let snapshot = WeatherSnapshot::new(
            MetersPerSecond::new(4.5),
            Octant::SOUTH,
            Percent::new(35.0),
            Celsius::new(28.5),
        );
        let log = [
            WeatherRecord { hours: 0.0, snapshot },
            WeatherRecord { hours: 1.0, snapshot },
        ];
        let text = written(|out| write_weather_csv(&log, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "t, temperature, relHumidity, windSpeed, windDirection");
        assert_eq!(lines[1], "0,28.5,35,4.5,5");
        assert_eq!(lines[2], "1,28.5,35,4.5,5");
    }

    #[test]
    fn file_names_are_numbered() {
        assert_eq!(numbered_file_name("burn_map", 3, "asc"), "burn_map3.asc");
        assert_eq!(numbered_file_name("weatherdata", 0, "csv"), "weatherdata0.csv");
    }
}
