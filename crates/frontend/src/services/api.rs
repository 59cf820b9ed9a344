use gloo_net::http::Request;
use shared_types::UserProfile;

const API_BASE_URL: &str = "http://localhost:8080";

pub struct ApiService;

impl ApiService {
    /// Where the browser should go to start the Google sign-in dance.
    pub fn google_login_url() -> String {
        format!("{}/auth/google", API_BASE_URL)
    }

    pub async fn get_profile(token: &str) -> Result<UserProfile, String> {
        let url = format!("{}/auth/profile", API_BASE_URL);

        let response = Request::get(&url)
            .header("Authorization", &format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }
}
