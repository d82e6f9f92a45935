use std::{env, fs, path::PathBuf};

use chrono::{Local, NaiveTime, Timelike};

fn main() {
    // 1) Handle memory.x based on target
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    if target.starts_with("thumbv8m") {
        // Pico 2 ARM
        copy_memory_x("memory-pico2.x", &out_dir);
    } else if target.starts_with("thumbv6m") {
        // Pico 1
        copy_memory_x("memory-pico1.x", &out_dir);
    }

    // 2) Load optional env file (convenient for pinning the build time)
    let _ = dotenvy::from_filename(".env");

    // 3) The wall time of this build, used to reseed an RTC that lost power.
    //    TIX_BUILD_TIME=HH:MM:SS overrides the local clock for reproducible builds.
    let build_time = match env::var("TIX_BUILD_TIME") {
        Ok(text) => NaiveTime::parse_from_str(&text, "%H:%M:%S")
            .expect("TIX_BUILD_TIME must be HH:MM:SS"),
        Err(_) => Local::now().time(),
    };

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=TIX_BUILD_HOUR={}", build_time.hour());
    println!("cargo:rustc-env=TIX_BUILD_MINUTE={}", build_time.minute());
    println!("cargo:rustc-env=TIX_BUILD_SECOND={}", build_time.second());

    println!("cargo:rerun-if-env-changed=TIX_BUILD_TIME");
    println!("cargo:rerun-if-changed=.env");
}

fn copy_memory_x(file: &str, out_dir: &PathBuf) {
    let memory_x = fs::read_to_string(file).unwrap_or_else(|_| panic!("Failed to read {file}"));
    let dest = out_dir.join("memory.x");
    fs::write(&dest, memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={file}");
}
