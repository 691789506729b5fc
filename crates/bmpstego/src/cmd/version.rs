use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("bmpstego {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: bmpstego");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("BMPSTEGO_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "frame: magic={:?} header={} max_extension={}",
        String::from_utf8_lossy(bmpstego_frame::DEFAULT_MAGIC),
        bmpstego_container::HEADER_SIZE,
        bmpstego_frame::MAX_EXTENSION_LEN
    );

    Ok(SUCCESS)
}
