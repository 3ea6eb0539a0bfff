//! fixpack demo
//!
//! Menjalankan skenario (i32, f64, u32, enum), menulis record file yang bisa
//! dibuka dari numpy, lalu mengukur latency serialize/deserialize.
//!
//! Usage:
//!   cargo run --release -- [--out <path>] [--records <n>] [-v]

use std::process::ExitCode;
use std::time::Instant;

use fixpack::{deserialize, deserialize_into, RecordFile, Serializer};

fixpack::field_enum! {
    #[derive(Debug)]
    enum Phase: u32 {
        Idle = 0,
        Running = 1,
        Done = 2,
    }
}

type Sample = (i32, f64, u32, Phase);

/// Demo configuration
struct DemoConfig {
    out_path: String,
    records: usize,
    verbose: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            out_path: "fixpack_demo.pack".to_string(),
            records: 1000,
            verbose: false,
        }
    }
}

impl DemoConfig {
    fn from_args() -> Result<Self, String> {
        let mut config = Self::default();
        let mut args = std::env::args().skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" | "-o" => {
                    config.out_path = args.next().ok_or("--out needs a path")?;
                }
                "--records" | "-n" => {
                    let value = args.next().ok_or("--records needs a number")?;
                    config.records = value
                        .parse()
                        .map_err(|_| format!("invalid record count: {value}"))?;
                }
                "--verbose" | "-v" => config.verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => return Err(format!("unknown argument: {other}")),
            }
        }

        Ok(config)
    }
}

fn print_usage() {
    println!("Usage: fixpack [--out <path>] [--records <n>] [-v]");
}

fn main() -> ExitCode {
    let config = match DemoConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    println!("📦 fixpack - Fixed-Layout Binary Packing");
    println!("=========================================\n");

    if let Err(e) = run(&config) {
        eprintln!("❌ {e}");
        return ExitCode::FAILURE;
    }

    println!("\n✅ Done!");
    ExitCode::SUCCESS
}

fn run(config: &DemoConfig) -> fixpack::Result<()> {
    demo_roundtrip()?;
    demo_record_file(config)?;
    benchmark_serializer();
    Ok(())
}

fn demo_roundtrip() -> fixpack::Result<()> {
    println!("📊 Round-trip (i32, f64, u32, enum)");
    println!("-----------------------------------");

    let mut s = Serializer::<Sample>::new();
    println!("  dtype: {}", s.tag_string());
    println!("  size:  {} bytes", s.size());
    for (desc, offset) in s.layout().iter() {
        println!("    @{:<3} {:>2} bytes  {}", offset, desc.size(), desc.tag());
    }

    let (i, f, time, phase) = (1, 1.123, 5, Phase::Running);
    println!("  in:  i={i}, f={f}, time={time}, phase={phase:?}");

    let copy = s.serialize((i, f, time, phase)).to_vec();

    let (mut j, mut k, mut t, mut p) = (0i32, 0f64, 0u32, Phase::Idle);
    deserialize_into(&copy, (&mut j, &mut k, &mut t, &mut p))?;
    println!("  out: i={j}, f={k}, time={t}, phase={p:?}\n");

    Ok(())
}

fn demo_record_file(config: &DemoConfig) -> fixpack::Result<()> {
    println!("📊 Record File (numpy memmap)");
    println!("-----------------------------");

    let mut file = RecordFile::<Sample>::create(&config.out_path, config.records)?;
    for n in 0..config.records {
        let phase = match n % 3 {
            0 => Phase::Idle,
            1 => Phase::Running,
            _ => Phase::Done,
        };
        file.push((n as i32, n as f64 * 0.5, (n * 10) as u32, phase))?;
    }
    file.flush()?;
    log::info!("wrote {} records to {}", file.len(), config.out_path);

    let reopened = RecordFile::<Sample>::open(&config.out_path)?;
    if let Some(last) = reopened.len().checked_sub(1) {
        println!("  last record: {:?}", reopened.get(last)?);
    }

    println!("  path:    {}", config.out_path);
    println!("  records: {}", reopened.len());
    println!(
        "  numpy:   np.memmap(\"{}\", dtype=\"{}\", offset={}, shape=({},))\n",
        config.out_path,
        reopened.tag_string(),
        reopened.data_offset(),
        reopened.len()
    );

    Ok(())
}

fn benchmark_serializer() {
    println!("📊 Serializer Benchmark");
    println!("-----------------------");

    const ITERATIONS: usize = 1_000_000;
    let mut s = Serializer::<(i32, f64, u32, u64)>::new();

    let start = Instant::now();
    for i in 0..ITERATIONS {
        let _ = std::hint::black_box(s.serialize((i as i32, i as f64, i as u32, i as u64)));
    }
    let encode_duration = start.elapsed();

    let bytes = s.data().to_vec();
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let _ = std::hint::black_box(deserialize::<(i32, f64, u32, u64)>(&bytes));
    }
    let decode_duration = start.elapsed();

    let encode_ns = encode_duration.as_nanos() as f64 / ITERATIONS as f64;
    let decode_ns = decode_duration.as_nanos() as f64 / ITERATIONS as f64;

    println!("  Record size: {} bytes", s.size());
    println!("  Operations:  {}", ITERATIONS);
    println!("  Serialize latency:   {:.2} ns/op", encode_ns);
    println!("  Deserialize latency: {:.2} ns/op", decode_ns);
    println!(
        "  Throughput: {:.2} M records/sec",
        ITERATIONS as f64 / encode_duration.as_secs_f64() / 1_000_000.0
    );
}
