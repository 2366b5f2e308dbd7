use std::sync::{Arc, Mutex};

use anyhow::Result;
use askama::Template;
use log::{info, warn};
use rouille::{router, Request, Response};
use serde_derive::Serialize;

use crate::carousel::{Carousel, View, EMPTY_MESSAGE, LOADING_MESSAGE};
use crate::common::Video;
use crate::config::Config;
use crate::projects::{sections, ProjectSection};
use crate::source::vimeo::{VimeoQuery, VimeoSettings};

#[derive(Debug, Serialize, Default)]
pub struct WebVideo {
    title: String,
    description: String,
    image: String,
    accent_color: String,
    /// e.g. `2 / 10`
    position: String,
}

impl<'a> From<(&'a Video, usize, usize)> for WebVideo {
    fn from(src: (&'a Video, usize, usize)) -> WebVideo {
        let (v, index, total) = src;
        WebVideo {
            title: v.title.clone(),
            description: v.description.clone(),
            image: v.image.clone(),
            accent_color: v.accent_color().into(),
            position: format!("{} / {}", index + 1, total),
        }
    }
}

/// Carousel panel as the template sees it
#[derive(Debug, Serialize, Default)]
pub struct WebCarousel {
    showing: bool,
    is_error: bool,
    message: String,
    video: WebVideo,
}

impl<'a> From<View<'a>> for WebCarousel {
    fn from(src: View<'a>) -> WebCarousel {
        match src {
            View::Loading => WebCarousel {
                message: LOADING_MESSAGE.into(),
                ..Default::default()
            },
            View::Error(msg) => WebCarousel {
                is_error: true,
                message: msg.into(),
                ..Default::default()
            },
            View::Empty => WebCarousel {
                message: EMPTY_MESSAGE.into(),
                ..Default::default()
            },
            View::Showing {
                video,
                index,
                total,
            } => WebCarousel {
                showing: true,
                video: (video, index, total).into(),
                ..Default::default()
            },
        }
    }
}

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate<'a> {
    featured: &'a [ProjectSection],
    others: &'a [ProjectSection],
    carousel: &'a WebCarousel,
}

fn page_landing(carousel: &Mutex<Carousel>) -> Result<Response> {
    let panel: WebCarousel = {
        let c = carousel
            .lock()
            .map_err(|_| anyhow::anyhow!("Carousel lock poisoned"))?;
        c.view().into()
    };
    let (featured, others) = sections();

    let t = LandingTemplate {
        featured: &featured,
        others: &others,
        carousel: &panel,
    };
    let html = t.render()?;
    Ok(Response::html(html))
}

enum Direction {
    Next,
    Previous,
}

fn page_navigate(carousel: &Mutex<Carousel>, dir: Direction) -> Result<Response> {
    {
        let mut c = carousel
            .lock()
            .map_err(|_| anyhow::anyhow!("Carousel lock poisoned"))?;
        match dir {
            Direction::Next => c.next(),
            Direction::Previous => c.previous(),
        }
    }

    // Back to the carousel for no-javascript clicking
    Ok(Response::redirect_303("/#carousel"))
}

fn handle_response(request: &Request, carousel: Arc<Mutex<Carousel>>) -> Response {
    if let Some(request) = request.remove_prefix("/static") {
        let x = match request.url().as_str() {
            "/showreel.css" => Some((include_str!("../static/showreel.css"), "text/css")),
            _ => None,
        };
        return match x {
            None => Response::text("404").with_status_code(404),
            Some((data, t)) => Response::from_data(t, data),
        };
    }

    let resp: Result<Response> = router!(request,
        (GET) ["/"] => {
            page_landing(&carousel)
        },
        (POST) ["/carousel/next"] => {
            page_navigate(&carousel, Direction::Next)
        },
        (POST) ["/carousel/previous"] => {
            page_navigate(&carousel, Direction::Previous)
        },
        // Default route
        _ => {
            Ok(Response::text("404 Not found").with_status_code(404))
        }
    );
    match resp {
        Ok(r) => r,
        Err(e) => Response::text(&format!("Internal service error: {:?}", e)).with_status_code(500),
    }
}

fn serve(cfg: &Config, carousel: Arc<Mutex<Carousel>>) -> Result<()> {
    let addr = cfg.web_addr();
    info!("Listening on http://{}", &addr);
    let srv = rouille::Server::new(&addr, move |request| {
        handle_response(request, carousel.clone())
    })
    .map_err(|e| anyhow::anyhow!("Unable to listen on {}: {}", &addr, e))?;

    srv.run();
    Ok(())
}

pub fn main() -> Result<()> {
    let cfg = Config::load()?;
    let carousel = Arc::new(Mutex::new(Carousel::new()));

    // Load videos in the background, the page shows a placeholder meanwhile
    let query = VimeoQuery::new(VimeoSettings::from_config(&cfg));
    let _loader = crate::carousel::mount(carousel.clone(), query);

    let ret = serve(&cfg, carousel.clone());
    shutdown(&carousel);
    ret
}

/// Detach the carousel so a load still in flight is discarded
fn shutdown(carousel: &Mutex<Carousel>) {
    match carousel.lock() {
        Ok(mut c) => c.unmount(),
        Err(_) => warn!("Carousel lock poisoned during shutdown"),
    }
}
