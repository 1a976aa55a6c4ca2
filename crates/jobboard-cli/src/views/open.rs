//! Resolve an arbitrary client path against the current session.

use anyhow::Result;

use jobboard_session::{Navigation, Route};

use crate::app::App;

pub async fn open(app: &App, path: &str) -> Result<()> {
    let route = Route::parse(path);

    match app.navigate(route).await {
        Navigation::Render(Route::NotFound) => println!("404: Page not found"),
        Navigation::Render(route) => println!("Rendering {}", route),
        Navigation::Pending => println!("Loading..."),
        Navigation::Redirect(target) => println!("Redirecting to {}", target),
    }
    Ok(())
}
