use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};

/// Nominatim reverse lookup response
#[derive(Debug, Deserialize)]
pub struct NominatimReverse {
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: NominatimAddress,
}

/// Nominatim address components
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub street: Option<String>,
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl NominatimAddress {
    /// House number and road, with `street` standing in for a missing road
    fn street_line(&self) -> Option<String> {
        let road = present(&self.road).or_else(|| present(&self.street));
        match (present(&self.house_number), road) {
            (Some(number), Some(road)) => Some(format!("{} {}", number, road)),
            (None, Some(road)) => Some(road.to_string()),
            (Some(number), None) => Some(number.to_string()),
            (None, None) => None,
        }
    }

    fn get_city(&self) -> Option<&str> {
        present(&self.city)
            .or_else(|| present(&self.town))
            .or_else(|| present(&self.village))
    }

    /// Comma-joined address, most specific part first; `None` when nothing is known
    pub fn format(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.street_line(),
            present(&self.suburb)
                .or_else(|| present(&self.neighbourhood))
                .map(str::to_string),
            self.get_city().map(str::to_string),
            present(&self.state).map(str::to_string),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// `lat, lon` with six decimals
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{:.6}, {:.6}", latitude, longitude)
}

/// Human-readable address for a point
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub formatted: String,
    pub full: String,
}

impl Address {
    fn coordinates_only(latitude: f64, longitude: f64) -> Self {
        let formatted = format_coordinates(latitude, longitude);
        Self {
            full: format!("Coordinates: {}", formatted),
            formatted,
        }
    }
}

/// Reverse geocoding against Nominatim
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Address for a point. Never fails: any lookup problem yields the
    /// coordinates themselves.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Address {
        match self.lookup(latitude, longitude).await {
            Ok(place) => {
                let formatted = place.address.format();
                match (formatted, place.display_name) {
                    (Some(formatted), Some(full)) => Address { formatted, full },
                    (Some(formatted), None) => Address {
                        full: formatted.clone(),
                        formatted,
                    },
                    (None, Some(full)) => Address {
                        formatted: full.clone(),
                        full,
                    },
                    (None, None) => {
                        tracing::warn!("Nominatim knows nothing about {}, {}", latitude, longitude);
                        Address::coordinates_only(latitude, longitude)
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                Address::coordinates_only(latitude, longitude)
            }
        }
    }

    async fn lookup(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> std::result::Result<NominatimReverse, String> {
        let params = [
            ("format", "json".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("zoom", "18".to_string()),
            ("addressdetails", "1".to_string()),
        ];
        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}/reverse?{}", self.base_url, query_string);

        tracing::debug!("Reverse geocoding {}, {} -> {}", latitude, longitude, url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en")
            .send()
            .await
            .map_err(|e| format!("Nominatim request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Nominatim returned status: {}", response.status()));
        }

        response
            .json::<NominatimReverse>()
            .await
            .map_err(|e| format!("Failed to parse Nominatim response: {}", e))
    }
}
