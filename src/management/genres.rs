use std::{collections::HashMap, path::PathBuf};

pub struct ArtistGenreManager {
    genres: HashMap<String, Vec<String>>,
}

impl ArtistGenreManager {
    pub fn new() -> Self {
        Self {
            genres: HashMap::new(),
        }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::cache_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let genres: HashMap<String, Vec<String>> =
            serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { genres })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.genres).map_err(|e| e.to_string())?;
        async_fs::write(&path, json).await.map_err(|e| e.to_string())
    }

    pub fn add(&mut self, artist_id: String, genres: Vec<String>) -> &mut Self {
        self.genres.insert(artist_id, genres);
        self
    }

    pub fn get(&self, artist_id: &str) -> Option<&Vec<String>> {
        self.genres.get(artist_id)
    }

    pub fn has(&self, artist_id: &str) -> bool {
        self.genres.contains_key(artist_id)
    }

    pub fn count(&self) -> usize {
        self.genres.len()
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sporecli/cache/artist-genres.json");
        path
    }
}

impl Default for ArtistGenreManager {
    fn default() -> Self {
        Self::new()
    }
}
