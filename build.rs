fn main() {
    // Reproducible builds pin the date through SOURCE_DATE_EPOCH
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    let build_date = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(chrono::Utc::now)
        .format("%Y-%m-%d")
        .to_string();
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}
