use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Greedy placement of coverage centers over a location graph", long_about = None)]
pub struct Args {
    #[arg(short = 'n', long, help = "Number of locations")]
    locations: Option<usize>,

    #[arg(short, long, help = "Comma-separated population per location; empty entries use the default weight")]
    populations: Option<String>,

    #[arg(long, help = "CSV file with id,population[,x,y] rows")]
    population_file: Option<String>,

    #[arg(short = 'x', long, help = "Coverage distance X")]
    distance: Option<f64>,

    #[arg(short, long, help = "Layout: chain, circular, grid or random")]
    layout: Option<String>,

    #[arg(short, long, help = "Edge weighting: unit or euclidean")]
    weighting: Option<String>,

    #[arg(long, help = "Nearest neighbours linked per location for geometric layouts")]
    neighbors: Option<usize>,

    #[arg(long)]
    grid_columns: Option<usize>,

    #[arg(long, help = "Random seed for the random layout")]
    seed: Option<u64>,

    #[arg(short, long, help = "JSON config file; command line flags override it")]
    config: Option<String>,

    #[arg(long, help = "Sweep coverage distances from 0 up to this value")]
    sweep_max: Option<f64>,

    #[arg(long, default_value_t = 1.0)]
    sweep_step: f64,

    #[arg(long, default_value_t = false)]
    parallel: bool,

    #[arg(short, long)]
    output_dir: Option<String>,

    #[arg(long, default_value_t = false)]
    export_csv: bool,

    #[arg(long, default_value_t = false)]
    export_json: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

impl Args {
    pub fn locations(&self) -> Option<usize> {
        self.locations
    }

    pub fn populations(&self) -> Option<&str> {
        self.populations.as_deref()
    }

    pub fn population_file(&self) -> Option<&str> {
        self.population_file.as_deref()
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    pub fn weighting(&self) -> Option<&str> {
        self.weighting.as_deref()
    }

    pub fn neighbors(&self) -> Option<usize> {
        self.neighbors
    }

    pub fn grid_columns(&self) -> Option<usize> {
        self.grid_columns
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn sweep_max(&self) -> Option<f64> {
        self.sweep_max
    }

    pub fn sweep_step(&self) -> f64 {
        self.sweep_step
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.output_dir.as_deref()
    }

    pub fn export_csv(&self) -> bool {
        self.export_csv
    }

    pub fn export_json(&self) -> bool {
        self.export_json
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}
