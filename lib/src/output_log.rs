use chrono::{DateTime, Utc};
use log::info;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};

pub fn create_yaml_file(folder_path: &str, file_name: &str) -> io::Result<String> {
    if fs::metadata(folder_path).is_err() {
        fs::create_dir_all(folder_path)?;
        info!("Created folder: {}", folder_path);
    }
    let file_path = format!("{}/{}.yaml", folder_path, file_name);
    fs::File::create(&file_path)?;
    Ok(file_path)
}

/// Creates `<dir_path>/<date>-<alg_name>-log.yaml`, the date being the current UTC time.
pub fn create_scheduler_log_yaml_file(dir_path: &str, alg_name: &str) -> io::Result<String> {
    let now: DateTime<Utc> = Utc::now();
    let date = now.format("%Y-%m-%d-%H-%M-%S").to_string();
    let file_name = format!("{}-{}-log", date, alg_name);
    create_yaml_file(dir_path, &file_name)
}

pub fn append_info_to_yaml(file_path: &str, info: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(file_path)?;
    file.write_all(info.as_bytes())
}
