use clap::Parser;
use rayon::prelude::*;
use savanna_fire_core::io::output::{
    numbered_file_name, write_burn_data_csv, write_burn_map, write_vegetation_csv,
    write_vegetation_map, write_weather_csv,
};
use savanna_fire_core::{
    ConfigError, FireWeatherSimulator, FixedWeather, GridLandscape, LandscapeParameters,
    MeteorologicalParameters, Month, MonthTable, RunResult, SimRng, SimulationConfig,
    SimulationRun, WeatherProvider, DEFAULT_SEED,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Savanna grass fire spread simulation
#[derive(Parser, Debug)]
#[command(name = "savanna-fire")]
#[command(about = "South African savanna fire spread model", long_about = None)]
struct Args {
    /// Parameter file for landscape generation
    #[arg(short = 'l', long, default_value = "landscape_s1.txt")]
    landscape_file: PathBuf,

    /// Import the landscape from ASCII grids in this directory instead of generating it
    #[arg(short = 'a', long, num_args = 0..=1, default_missing_value = ".")]
    import_landscape: Option<PathBuf>,

    /// Simulate fire weather from monthly statistics
    #[arg(short = 's', long, requires = "weather_file", requires = "month")]
    simulate_weather: bool,

    /// Meteorological parameter file (with -s)
    #[arg(short = 'w', long)]
    weather_file: Option<PathBuf>,

    /// Month of the simulated fire weather (JAN..DEC)
    #[arg(short = 'm', long)]
    month: Option<String>,

    /// Decode month names with the historical table (JUL as June, AUG as July)
    #[arg(long)]
    legacy_month_table: bool,

    /// Fixed fire weather file (without -s)
    #[arg(short = 'b', long, default_value = "fixed_fireweather.txt")]
    fixed_weather_file: PathBuf,

    /// Length of one timestep in seconds
    #[arg(short = 't', long, default_value_t = 15)]
    timestep: u32,

    /// Maximum number of timesteps per run
    #[arg(short = 'd', long, default_value_t = 5400)]
    max_duration: u32,

    /// Number of model runs
    #[arg(short = 'r', long, default_value_t = 1)]
    runs: u32,

    /// Ignite at the central vertex instead of a random one
    #[arg(short = 'c', long)]
    centered: bool,

    /// Clock hour at which the fire starts
    #[arg(long, default_value_t = 12)]
    start_hour: u32,

    /// Base seed; run i uses stream i
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Directory for output files
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Also write the vegetation map and table of every run before burning
    #[arg(long)]
    vegetation_output: bool,

    /// Log every step
    #[arg(short, long)]
    verbose: bool,
}

/// Where each run gets its landscape
enum LandscapeSource {
    Generated(LandscapeParameters),
    Imported(GridLandscape),
}

/// Where each run gets its weather
enum WeatherSource {
    Fixed(FixedWeather),
    Simulated(MeteorologicalParameters),
}

/// Inputs shared by every run
struct Setup {
    landscape: LandscapeSource,
    weather: WeatherSource,
    config: SimulationConfig,
    output: PathBuf,
    vegetation_output: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let setup = match prepare(&args) {
        Ok(setup) => setup,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Starting {} run(s): timestep {} s, at most {} steps, seed {}",
        setup.config.runs, setup.config.timestep_seconds, setup.config.max_steps, setup.config.seed
    );

    let failures: Vec<ConfigError> = (0..setup.config.runs)
        .into_par_iter()
        .filter_map(|index| run_once(&setup, index).err())
        .collect();

    if failures.is_empty() {
        info!("All runs finished");
        ExitCode::SUCCESS
    } else {
        for e in &failures {
            error!("{}", e);
        }
        ExitCode::FAILURE
    }
}

/// Read every input file and build the run configuration
fn prepare(args: &Args) -> Result<Setup, ConfigError> {
    let table = if args.legacy_month_table {
        MonthTable::Legacy
    } else {
        MonthTable::Corrected
    };
    let month = match &args.month {
        Some(name) => Month::from_abbreviation(name, table)
            .ok_or_else(|| ConfigError::UnknownMonth(name.clone()))?,
        None => Month::January,
    };

    let config = SimulationConfig {
        timestep_seconds: args.timestep,
        max_steps: args.max_duration,
        runs: args.runs,
        seed: args.seed,
        centered_ignition: args.centered,
        start_hour: args.start_hour,
        month,
        ..SimulationConfig::default()
    };
    config.validate()?;

    let landscape = match &args.import_landscape {
        Some(directory) => LandscapeSource::Imported(GridLandscape::from_directory(directory)?),
        None => LandscapeSource::Generated(LandscapeParameters::read(&args.landscape_file)?),
    };

    let weather = if args.simulate_weather {
        let path = args
            .weather_file
            .as_deref()
            .ok_or_else(|| ConfigError::invalid("weather file", "required with -s"))?;
        WeatherSource::Simulated(MeteorologicalParameters::read(path)?)
    } else {
        WeatherSource::Fixed(FixedWeather::read(&args.fixed_weather_file)?)
    };

    std::fs::create_dir_all(&args.output).map_err(|e| ConfigError::io(&args.output, e))?;

    Ok(Setup {
        landscape,
        weather,
        config,
        output: args.output.clone(),
        vegetation_output: args.vegetation_output,
    })
}

/// Build, burn and write out run `index`
fn run_once(setup: &Setup, index: u32) -> Result<(), ConfigError> {
    let mut rng = SimRng::for_run(setup.config.seed, u64::from(index));
    let i = index as usize;

    let landscape = match &setup.landscape {
        LandscapeSource::Generated(parameters) => GridLandscape::generate(parameters, &mut rng)?,
        LandscapeSource::Imported(landscape) => landscape.clone(),
    };

    if setup.vegetation_output {
        write_file(&setup.output, &numbered_file_name("vegetation_map", i, "asc"), |out| {
            write_vegetation_map(&landscape, out)
        })?;
        write_file(&setup.output, &numbered_file_name("vegetation_data", i, "csv"), |out| {
            write_vegetation_csv(&landscape, out)
        })?;
    }

    let weather: Box<dyn WeatherProvider> = match &setup.weather {
        WeatherSource::Simulated(parameters) => Box::new(FireWeatherSimulator::new(
            parameters.clone(),
            setup.config.start_hour,
        )?),
        WeatherSource::Fixed(fixed) => Box::new(*fixed),
    };

    let result = SimulationRun::new(landscape, weather, setup.config.clone())?.run(&mut rng);
    info!(
        "Run {}: {:?} after {} s, {} cells burned out",
        index,
        result.stop_reason,
        result.elapsed_seconds(),
        result.burned_out()
    );

    write_results(setup, i, &result)
}

fn write_results(setup: &Setup, i: usize, result: &RunResult<GridLandscape>) -> Result<(), ConfigError> {
    write_file(&setup.output, &numbered_file_name("burn_map", i, "asc"), |out| {
        write_burn_map(&result.landscape, out)
    })?;
    write_file(&setup.output, &numbered_file_name("burndata", i, "csv"), |out| {
        write_burn_data_csv(&result.landscape, &result.engine, out)
    })?;
    if matches!(setup.weather, WeatherSource::Simulated(_)) {
        write_file(&setup.output, &numbered_file_name("weatherdata", i, "csv"), |out| {
            write_weather_csv(&result.weather_log, out)
        })?;
    }
    Ok(())
}

fn write_file<F>(directory: &Path, name: &str, write: F) -> Result<(), ConfigError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let path = directory.join(name);
    let file = File::create(&path).map_err(|e| ConfigError::io(&path, e))?;
    let mut out = BufWriter::new(file);
    write(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| ConfigError::io(&path, e))
}
