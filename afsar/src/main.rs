use std::path::{Path, PathBuf};

use clap::{crate_description, crate_name, crate_version, App, Arg};

use afsar::{pack, unpack};

fn main() -> anyhow::Result<()> {
    let matches = App::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::with_name("input")
                .help("Path to AFS file to be unpacked or folder to be packed")
                .required(true)
                .value_name("PATH"),
        )
        .arg(
            Arg::with_name("output")
                .help("Output path of extracted folder or new AFS")
                .value_name("PATH"),
        )
        .arg(
            Arg::with_name("padding")
                .help("Data padding, must be a power of 2")
                .long("padding")
                .takes_value(true)
                .value_name("BYTES")
                .default_value("2048"),
        )
        .get_matches();

    let input = PathBuf::from(matches.value_of("input").unwrap());
    let output = matches.value_of("output").map(PathBuf::from);

    let padding_arg = matches.value_of("padding").unwrap();
    let padding: u32 = padding_arg
        .parse()
        .map_err(|_| anyhow::anyhow!("--padding expects an integer, got '{}'", padding_arg))?;

    if input.is_dir() {
        let output = output.unwrap_or_else(|| append_to_path(&input, ".afs"));
        println!("Loading input folder...");
        pack(&input, &output, padding)?;
        println!("Wrote {}", output.display());
    } else {
        let output = output.unwrap_or_else(|| append_to_path(&input, "_ext"));
        println!("Loading input AFS...");
        unpack(&input, &output)?;
        println!("Extracted to {}", output.display());
    }

    Ok(())
}

fn append_to_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
