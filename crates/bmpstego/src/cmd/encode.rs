use std::fs::File;
use std::path::Path;

use bmpstego_frame::{EmbedReport, FrameConfig, FrameWriter};
use serde::Serialize;
use tracing::info;

use crate::cmd::{discard_partial, reject_same_file, require_bmp, secret_extension, EncodeArgs};
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::{human_bytes, print_report, OutputFormat, Row};

#[derive(Serialize)]
struct EncodeOutput {
    source: String,
    stego: String,
    extension: String,
    secret_bytes: u64,
    required_bytes: u64,
    available_bytes: u64,
    frame_bytes: u64,
    spare_bytes: u64,
}

pub fn run(args: EncodeArgs, format: OutputFormat, config: &FrameConfig) -> CliResult<i32> {
    require_bmp(&args.source, "source image")?;
    require_bmp(&args.stego, "stego image")?;
    reject_same_file(&args.source, &args.stego, "stego image")?;

    let extension = args
        .extension
        .clone()
        .unwrap_or_else(|| secret_extension(&args.secret, config));

    let carrier = open(&args.source)?;
    let secret = open(&args.secret)?;
    let secret_len = secret
        .metadata()
        .map_err(|err| io_error(&format!("failed reading {}", args.secret.display()), err))?
        .len();

    let dest = File::create(&args.stego)
        .map_err(|err| io_error(&format!("failed creating {}", args.stego.display()), err))?;

    let mut writer = FrameWriter::with_config(carrier, dest, config.clone());
    let result = writer.embed(&extension, secret, secret_len);
    drop(writer);

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            discard_partial(&args.stego);
            return Err(frame_error("encode failed", err));
        }
    };

    info!(stego = %args.stego.display(), "encoding finished");
    print_encode(&args, &report, format);
    Ok(SUCCESS)
}

fn open(path: &Path) -> CliResult<File> {
    File::open(path).map_err(|err| io_error(&format!("failed opening {}", path.display()), err))
}

fn print_encode(args: &EncodeArgs, report: &EmbedReport, format: OutputFormat) {
    let out = EncodeOutput {
        source: args.source.display().to_string(),
        stego: args.stego.display().to_string(),
        extension: report.extension.clone(),
        secret_bytes: report.secret_len,
        required_bytes: report.ledger.required,
        available_bytes: report.ledger.available,
        frame_bytes: report.frame_bytes,
        spare_bytes: report.ledger.spare(),
    };
    let rows: Vec<Row> = vec![
        ("stego", out.stego.clone()),
        ("extension", out.extension.clone()),
        ("secret", human_bytes(out.secret_bytes)),
        ("required", human_bytes(out.required_bytes)),
        ("available", human_bytes(out.available_bytes)),
        ("spare", human_bytes(out.spare_bytes)),
    ];
    print_report("encoded", &out, &rows, format);
}
