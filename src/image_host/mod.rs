//! Client for the remote asset host that serves apparel images

mod client;

pub use client::{HostedImage, ImageHostClient, ImageListing, DEFAULT_LIMIT, DEFAULT_PAGE};
