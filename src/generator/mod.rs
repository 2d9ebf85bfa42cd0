pub mod rss;
pub mod sitemap;
