use std::fs::File;

use bmpstego_frame::{FrameConfig, FrameReader};
use serde::Serialize;
use tracing::info;

use crate::cmd::{discard_partial, reject_same_file, DecodeArgs};
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::{human_bytes, print_report, OutputFormat, Row};

#[derive(Serialize)]
struct DecodeOutput {
    stego: String,
    output: String,
    extension: String,
    secret_bytes: u64,
}

pub fn run(args: DecodeArgs, format: OutputFormat, config: &FrameConfig) -> CliResult<i32> {
    let carrier = File::open(&args.stego)
        .map_err(|err| io_error(&format!("failed opening {}", args.stego.display()), err))?;

    // Nothing is created on disk until the frame has been recognised.
    let reader = FrameReader::with_config(carrier, config.clone())
        .read_preamble()
        .map_err(|err| frame_error("decode failed", err))?;
    let preamble = reader.preamble().clone();
    let output = preamble.output_path(&args.output);
    reject_same_file(&args.stego, &output, "decoded output")?;

    let file = File::create(&output)
        .map_err(|err| io_error(&format!("failed creating {}", output.display()), err))?;

    if let Err(err) = reader.copy_to(file) {
        discard_partial(&output);
        return Err(frame_error("decode failed", err));
    }

    info!(output = %output.display(), "decoding finished");

    let out = DecodeOutput {
        stego: args.stego.display().to_string(),
        output: output.display().to_string(),
        extension: preamble.extension,
        secret_bytes: preamble.secret_len,
    };
    let rows: Vec<Row> = vec![
        ("output", out.output.clone()),
        ("extension", out.extension.clone()),
        ("secret", human_bytes(out.secret_bytes)),
    ];
    print_report("decoded", &out, &rows, format);
    Ok(SUCCESS)
}
