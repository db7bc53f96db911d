pub mod feed_pipeline;
