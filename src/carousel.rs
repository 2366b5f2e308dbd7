use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::Result;
use log::{debug, error, info};

use crate::common::Video;
use crate::source::base::VideoSource;

pub const LOADING_MESSAGE: &str = "Loading videos...";
pub const EMPTY_MESSAGE: &str = "No videos available";
/// Used when a failed load carries no message of its own
pub const FALLBACK_ERROR: &str = "Failed to load videos";

/// Load status of a carousel. Leaves `Loading` at most once.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Loading,
    Error(String),
    Ready,
}

/// What the page should show for the carousel right now
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    /// Loaded fine but there is nothing to show
    Empty,
    Showing {
        video: &'a Video,
        index: usize,
        total: usize,
    },
}

/// Permission to apply the result of one load, see `Carousel::begin_load`
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
}

/// The list of videos plus the position within it
#[derive(Debug)]
pub struct Carousel {
    status: Status,
    videos: Vec<Video>,
    current_index: usize,
    generation: u64,
    load_started: bool,
}

fn error_message(e: &anyhow::Error) -> String {
    let msg = e.to_string();
    if msg.trim().is_empty() {
        FALLBACK_ERROR.into()
    } else {
        msg
    }
}

impl Carousel {
    pub fn new() -> Carousel {
        Carousel {
            status: Status::Loading,
            videos: vec![],
            current_index: 0,
            generation: 0,
            load_started: false,
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    #[cfg(test)]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Only navigable when loaded with at least one video
    fn navigable(&self) -> bool {
        self.status == Status::Ready && !self.videos.is_empty()
    }

    pub fn current(&self) -> Option<&Video> {
        if self.navigable() {
            self.videos.get(self.current_index)
        } else {
            None
        }
    }

    pub fn view(&self) -> View<'_> {
        match &self.status {
            Status::Loading => View::Loading,
            Status::Error(msg) => View::Error(msg),
            Status::Ready => match self.current() {
                Some(video) => View::Showing {
                    video,
                    index: self.current_index,
                    total: self.videos.len(),
                },
                None => View::Empty,
            },
        }
    }

    /// Start the one and only load. Returns `None` if a load was already
    /// started or the carousel was unmounted.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.load_started {
            return None;
        }
        self.load_started = true;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Apply the outcome of a load. Results from a ticket issued before
    /// `unmount` are discarded. Returns whether the result was applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Video>>) -> bool {
        if ticket.generation != self.generation || self.status != Status::Loading {
            debug!("Discarding stale carousel load");
            return false;
        }
        match result {
            Ok(videos) => {
                info!("Carousel loaded with {} videos", videos.len());
                self.videos = videos;
                self.current_index = 0;
                self.status = Status::Ready;
            }
            Err(e) => {
                error!("Error loading videos - {:?}", e);
                self.status = Status::Error(error_message(&e));
            }
        }
        true
    }

    /// Detach from any in-flight load so its result is never applied
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.load_started = true;
    }

    pub fn next(&mut self) {
        if self.navigable() {
            self.current_index = (self.current_index + 1) % self.videos.len();
        }
    }

    pub fn previous(&mut self) {
        if self.navigable() {
            let len = self.videos.len();
            self.current_index = (self.current_index + len - 1) % len;
        }
    }
}

/// Run the carousel's single load on a background thread. Returns `None`
/// when the load has already been started.
pub fn mount<S>(shared: Arc<Mutex<Carousel>>, source: S) -> Option<JoinHandle<()>>
where
    S: VideoSource + Send + 'static,
{
    let ticket = shared.lock().ok()?.begin_load()?;
    Some(std::thread::spawn(move || {
        let result = source.videos();
        match shared.lock() {
            Ok(mut c) => {
                c.finish_load(ticket, result);
            }
            Err(_) => error!("Carousel lock poisoned, dropping load result"),
        }
    }))
}

#[cfg(test)]
mod test {
    use super::*;

    struct FixedSource(std::result::Result<Vec<Video>, String>);

    impl VideoSource for FixedSource {
        fn videos(&self) -> Result<Vec<Video>> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(msg) => Err(anyhow::anyhow!("{}", msg)),
            }
        }
    }

    fn videos(n: usize) -> Vec<Video> {
        (0..n)
            .map(|i| Video {
                title: format!("Video {}", i),
                description: "A video.".into(),
                image: format!("https://i.example.com/{}.jpg", i),
                dominant_color: "#000000".into(),
            })
            .collect()
    }

    fn loaded(n: usize) -> Carousel {
        let mut c = Carousel::new();
        let t = c.begin_load().unwrap();
        assert!(c.finish_load(t, Ok(videos(n))));
        c
    }

    #[test]
    fn test_starts_loading() {
        let c = Carousel::new();
        assert_eq!(c.status(), &Status::Loading);
        assert_eq!(c.view(), View::Loading);
        assert!(c.current().is_none());
    }

    #[test]
    fn test_ready_at_first_video() {
        let c = loaded(3);
        assert_eq!(c.status(), &Status::Ready);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current().unwrap().title, "Video 0");
        match c.view() {
            View::Showing { index, total, .. } => {
                assert_eq!(index, 0);
                assert_eq!(total, 3);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_wraps_around() {
        let mut c = loaded(3);
        c.previous();
        assert_eq!(c.current_index(), 2);
        c.next();
        assert_eq!(c.current_index(), 0);
        c.next();
        c.next();
        c.next();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_cyclic_from_every_index() {
        for n in 1..6 {
            for start in 0..n {
                let mut c = loaded(n);
                for _ in 0..start {
                    c.next();
                }
                assert_eq!(c.current_index(), start);

                for _ in 0..n {
                    c.next();
                }
                assert_eq!(c.current_index(), start);
                for _ in 0..n {
                    c.previous();
                }
                assert_eq!(c.current_index(), start);

                c.next();
                c.previous();
                assert_eq!(c.current_index(), start);
                c.previous();
                c.next();
                assert_eq!(c.current_index(), start);
            }
        }
    }

    #[test]
    fn test_single_video_stays_put() {
        let mut c = loaded(1);
        c.next();
        assert_eq!(c.current_index(), 0);
        c.previous();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_empty_list_not_navigable() {
        let mut c = loaded(0);
        assert_eq!(c.view(), View::Empty);
        c.next();
        c.previous();
        assert_eq!(c.current_index(), 0);
        assert!(c.current().is_none());
    }

    #[test]
    fn test_failure_exposes_no_video() {
        let mut c = Carousel::new();
        let t = c.begin_load().unwrap();
        c.finish_load(t, Err(anyhow::anyhow!("Failed to fetch videos")));
        assert_eq!(c.status(), &Status::Error("Failed to fetch videos".into()));
        assert_eq!(c.view(), View::Error("Failed to fetch videos"));
        c.next();
        assert!(c.current().is_none());
    }

    #[test]
    fn test_blank_error_uses_fallback() {
        let mut c = Carousel::new();
        let t = c.begin_load().unwrap();
        c.finish_load(t, Err(anyhow::anyhow!("")));
        assert_eq!(c.view(), View::Error(FALLBACK_ERROR));
    }

    #[test]
    fn test_loads_only_once() {
        let mut c = Carousel::new();
        let t = c.begin_load().unwrap();
        assert!(c.begin_load().is_none());
        assert!(c.finish_load(t, Ok(videos(2))));
        assert!(c.begin_load().is_none());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_unmount_discards_in_flight_load() {
        let mut c = Carousel::new();
        let t = c.begin_load().unwrap();
        c.unmount();
        assert!(!c.finish_load(t, Ok(videos(2))));
        assert_eq!(c.status(), &Status::Loading);
        assert!(c.is_empty());
    }

    #[test]
    fn test_mount_applies_result() {
        let shared = Arc::new(Mutex::new(Carousel::new()));
        let handle = mount(shared.clone(), FixedSource(Ok(videos(4)))).unwrap();
        handle.join().unwrap();

        // Second mount is refused
        assert!(mount(shared.clone(), FixedSource(Ok(videos(1)))).is_none());

        let c = shared.lock().unwrap();
        assert_eq!(c.status(), &Status::Ready);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_mount_failure() {
        let shared = Arc::new(Mutex::new(Carousel::new()));
        let source = FixedSource(Err("Failed to fetch videos".into()));
        let handle = mount(shared.clone(), source).unwrap();
        handle.join().unwrap();

        let c = shared.lock().unwrap();
        assert_eq!(c.view(), View::Error("Failed to fetch videos"));
    }
}
