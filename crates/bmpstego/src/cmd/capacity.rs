use std::fs::File;

use bmpstego_container::read_header;
use bmpstego_frame::{CapacityLedger, FrameConfig};
use serde::Serialize;

use crate::cmd::{require_bmp, secret_extension, CapacityArgs};
use crate::exit::{container_error, io_error, CliResult, CAPACITY_EXCEEDED, SUCCESS};
use crate::output::{human_bytes, print_report, OutputFormat, Row};

#[derive(Serialize)]
struct CapacityOutput {
    source: String,
    width: i32,
    height: i32,
    available_bytes: u64,
    extension: String,
    max_secret_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_bytes: Option<u64>,
    required_bytes: u64,
    fits: bool,
}

pub fn run(args: CapacityArgs, format: OutputFormat, config: &FrameConfig) -> CliResult<i32> {
    require_bmp(&args.source, "source image")?;

    let mut carrier = File::open(&args.source)
        .map_err(|err| io_error(&format!("failed opening {}", args.source.display()), err))?;
    let header = read_header(&mut carrier, config.header_size)
        .map_err(|err| container_error("failed reading header", err))?;

    let (extension, secret_len) = match &args.secret {
        Some(path) => {
            let len = std::fs::metadata(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?
                .len();
            (secret_extension(path, config), Some(len))
        }
        None => (config.default_extension.clone(), None),
    };

    let ledger = CapacityLedger::plan(config, &header, extension.len(), secret_len.unwrap_or(0));
    let out = CapacityOutput {
        source: args.source.display().to_string(),
        width: header.width(),
        height: header.height(),
        available_bytes: ledger.available,
        max_secret_bytes: ledger.max_secret_len(secret_len.unwrap_or(0)),
        extension,
        secret_bytes: secret_len,
        required_bytes: ledger.required,
        fits: ledger.fits(),
    };

    let mut rows: Vec<Row> = vec![
        ("dimensions", format!("{} x {}", out.width, out.height)),
        ("available", human_bytes(out.available_bytes)),
        ("max secret", human_bytes(out.max_secret_bytes)),
    ];
    if let Some(len) = out.secret_bytes {
        rows.push(("secret", human_bytes(len)));
        rows.push(("required", human_bytes(out.required_bytes)));
        rows.push(("fits", out.fits.to_string()));
    }
    print_report("capacity", &out, &rows, format);

    if out.fits {
        Ok(SUCCESS)
    } else {
        Ok(CAPACITY_EXCEEDED)
    }
}
