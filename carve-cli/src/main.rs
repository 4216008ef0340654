//! Command-line front end: parses `-p/-r/-i/-h`, loads a `VoxelModel` and
//! reports its exit status via a hand-rolled argument loop rather than a
//! dedicated parsing crate.

use std::process::ExitCode;

use carve::VoxelModel;

struct Config {
    path: Option<String>,
    resolution: usize,
    info: bool,
    help: bool,
}

fn print_help() {
    println!("Usage: carve -p <path> [options]");
    println!("Options:");
    println!("    -p, --path <string>    Model path (required)");
    println!("    -r, --resolution <int> Voxel space resolution");
    println!("    -i, --info             Print additional info");
    println!("    -h, --help             Show this help message");
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Config, String> {
    let mut config = Config {
        path: None,
        resolution: 16,
        info: false,
        help: false,
    };

    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-p" | "--path" => {
                config.path = Some(args.next().ok_or("--path requires a value")?);
            }
            "-r" | "--resolution" => {
                let raw = args.next().ok_or("--resolution requires a value")?;
                let resolution: i64 = raw.parse().map_err(|_| "invalid resolution value".to_string())?;
                if resolution <= 0 {
                    return Err("resolution must be positive".to_string());
                }
                config.resolution = resolution as usize;
            }
            "-i" | "--info" => config.info = true,
            "-h" | "--help" => config.help = true,
            other => return Err(format!("unrecognized argument: {other}")),
        }
    }

    Ok(config)
}

fn main() -> ExitCode {
    let config = match parse_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            print_help();
            return ExitCode::FAILURE;
        }
    };

    if config.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let Some(path) = config.path else {
        print_help();
        return ExitCode::FAILURE;
    };

    println!("[+] Creating voxel model from {path}");
    match VoxelModel::load(&path, config.resolution, config.info) {
        Ok(_model) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution_is_sixteen() {
        let config = parse_args(["-p", "models/foo"].into_iter().map(String::from)).unwrap();
        assert_eq!(config.resolution, 16);
        assert_eq!(config.path.as_deref(), Some("models/foo"));
    }

    #[test]
    fn test_rejects_nonpositive_resolution() {
        let result = parse_args(["-p", "models/foo", "-r", "0"].into_iter().map(String::from));
        assert!(result.is_err());
    }

    #[test]
    fn test_help_flag_short_circuits_path_requirement() {
        let config = parse_args(["-h"].into_iter().map(String::from)).unwrap();
        assert!(config.help);
    }
}
