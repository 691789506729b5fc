use std::fs::File;

use bmpstego_frame::{FrameConfig, FrameReader};
use serde::Serialize;

use crate::cmd::InspectArgs;
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::{human_bytes, print_report, OutputFormat, Row};

#[derive(Serialize)]
struct InspectOutput {
    stego: String,
    width: i32,
    height: i32,
    magic: String,
    extension: String,
    secret_bytes: u64,
}

pub fn run(args: InspectArgs, format: OutputFormat, config: &FrameConfig) -> CliResult<i32> {
    let carrier = File::open(&args.stego)
        .map_err(|err| io_error(&format!("failed opening {}", args.stego.display()), err))?;
    let preamble = FrameReader::with_config(carrier, config.clone())
        .read_preamble()
        .map_err(|err| frame_error("no embedded frame", err))?
        .into_preamble();

    let out = InspectOutput {
        stego: args.stego.display().to_string(),
        width: preamble.header.width(),
        height: preamble.header.height(),
        magic: String::from_utf8_lossy(&config.magic).into_owned(),
        extension: preamble.extension,
        secret_bytes: preamble.secret_len,
    };
    let rows: Vec<Row> = vec![
        ("dimensions", format!("{} x {}", out.width, out.height)),
        ("magic", out.magic.clone()),
        ("extension", out.extension.clone()),
        ("secret", human_bytes(out.secret_bytes)),
    ];
    print_report("frame", &out, &rows, format);
    Ok(SUCCESS)
}
