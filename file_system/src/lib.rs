use std::{fs, io, path::PathBuf};

use directories_next::ProjectDirs;

/// Returns path to the favorites store file located in default data dir for application.
pub fn get_favorites_store_path() -> io::Result<PathBuf> {
    Ok(get_default_data_dir()?.join("favorites.json"))
}

/// Returns path to the log directory located in default data dir for application.
pub fn get_log_dir() -> io::Result<PathBuf> {
    let log_dir = get_default_data_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

fn get_default_data_dir() -> io::Result<PathBuf> {
    let data_dir = match get_project_dirs() {
        Some(project_dirs) => project_dirs.data_local_dir().to_path_buf(),
        None => PathBuf::from(".").join("perfume-catalog"),
    };
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

fn get_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "perfume-catalog", "perfume-catalog")
}
