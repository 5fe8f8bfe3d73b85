use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{Read, Write};
use std::process::ExitCode;

use libwide::bench;
use libwide::config::Config;
use libwide::core::{dynamic, ByteOrder, ErrorPolicy, Kind, UnitBuf};
use libwide::error::Result;
use libwide::report::{ConversionReport, WidthReport};

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let debug = flag(&matches, "debug")
        || matches.subcommand().map_or(false, |(_, m)| flag(m, "debug"));
    init_logging(debug);

    let config = Config::load();
    log::debug!("config = {:?}", config);

    let result = match matches.subcommand() {
        Some(("convert", m)) => run_convert(&config, m),
        Some(("width", m)) => run_width(&config, m),
        Some(("bench", _)) => run_bench(),
        _ => Ok(ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("wide: {}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn encoding_arg(name: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name)
        .long(name)
        .takes_value(true)
        .value_name("ENCODING")
        .help(help)
}

fn cli() -> Command<'static> {
    let big_endian = Arg::new("big-endian")
        .long("big-endian")
        .action(ArgAction::SetTrue)
        .help("read and write 16/32-bit units in big-endian byte order");
    let file = Arg::new("FILE").index(1).help("input file (default: stdin)");

    Command::new("wide")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert text between Unicode encodings and measure its terminal width")
        .subcommand_required(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("enable debug logs on stderr"),
        )
        .subcommand(
            Command::new("convert")
                .about("convert FILE and write the result to stdout")
                .arg(encoding_arg("from", "source encoding: narrow, wide, utf-8, utf-16, utf-32"))
                .arg(encoding_arg("to", "destination encoding"))
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .takes_value(true)
                        .value_name("POLICY")
                        .help("invalid input handling: replace, skip, stop"),
                )
                .arg(big_endian.clone())
                .arg(
                    Arg::new("report")
                        .long("report")
                        .action(ArgAction::SetTrue)
                        .help("print a JSON conversion report on stderr"),
                )
                .arg(file.clone()),
        )
        .subcommand(
            Command::new("width")
                .about("print the display width of every line of FILE")
                .arg(encoding_arg("from", "input encoding"))
                .arg(big_endian)
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("print a JSON width report"),
                )
                .arg(file),
        )
        .subcommand(Command::new("bench").about("run the codec and width micro-benchmarks"))
}

fn flag(m: &ArgMatches, id: &str) -> bool {
    m.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false)
}

fn kind_or(m: &ArgMatches, id: &str, default: Kind) -> Result<Kind> {
    match m.get_one::<String>(id) {
        Some(s) => s.parse(),
        None => Ok(default),
    }
}

fn byte_order(config: &Config, m: &ArgMatches) -> ByteOrder {
    if flag(m, "big-endian") {
        ByteOrder::Big
    } else {
        config.io.byte_order
    }
}

fn read_input(path: Option<&String>) -> Result<Vec<u8>> {
    match path.map(String::as_str) {
        None | Some("-") => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(p) => Ok(std::fs::read(p)?),
    }
}

fn run_convert(config: &Config, m: &ArgMatches) -> Result<ExitCode> {
    let from = kind_or(m, "from", config.convert.from)?;
    let to = kind_or(m, "to", config.convert.to)?;
    let policy = match m.get_one::<String>("policy") {
        Some(p) => p.parse::<ErrorPolicy>()?,
        None => config.convert.policy,
    };
    let order = byte_order(config, m);

    let bytes = read_input(m.get_one::<String>("FILE"))?;
    let src = UnitBuf::from_bytes(from, &bytes, order)?;
    let out = dynamic::convert(from, to, &src, policy)?;

    if flag(m, "report") {
        eprintln!("{}", ConversionReport::new(from, to, policy, &src, &out).to_json()?);
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&out.value.to_bytes(order))?;
    stdout.flush()?;

    if out.is_valid {
        Ok(ExitCode::SUCCESS)
    } else {
        log::warn!("input contained malformed {} sequences (policy: {})", from, policy);
        Ok(ExitCode::FAILURE)
    }
}

fn run_width(config: &Config, m: &ArgMatches) -> Result<ExitCode> {
    let from = kind_or(m, "from", config.width.from)?;
    let order = byte_order(config, m);
    let path = m.get_one::<String>("FILE");

    let bytes = read_input(path)?;
    let src = UnitBuf::from_bytes(from, &bytes, order)?;
    let lines = dynamic::lines(from, &src)?;

    if flag(m, "json") {
        let mut report = WidthReport::new(path.map_or("stdin", String::as_str), from);
        for line in &lines {
            report.push(dynamic::width(from, line)?);
        }
        println!("{}", report.to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut stdout = std::io::stdout().lock();
    for (n, line) in lines.iter().enumerate() {
        match dynamic::width(from, line)? {
            Ok(w) => writeln!(stdout, "{}", w)?,
            Err(e) => {
                log::debug!("line {}: {}", n + 1, e);
                writeln!(stdout, "-")?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_bench() -> Result<ExitCode> {
    for r in bench::run_all() {
        println!("{}", r);
    }
    Ok(ExitCode::SUCCESS)
}
