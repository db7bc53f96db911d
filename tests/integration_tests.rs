use anyhow::Result;
use feed_catalog::core::ConfigProvider;
use feed_catalog::{
    CatalogError, CliConfig, ConversionEngine, FeedPipeline, InputSource, LocalStorage,
    CANONICAL_SCHEMA,
};
use httpmock::prelude::*;
use tempfile::TempDir;

const SHOPIFY_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:g="http://base.google.com/ns/1.0" version="2.0">
  <channel>
    <title>Example Store</title>
    <link>https://store.example.com</link>
    <item>
      <g:id>shopify_US_1_11</g:id>
      <g:title>Linen Shirt</g:title>
      <title>Linen Shirt - Legacy</title>
      <g:description>Breathable, relaxed fit</g:description>
      <g:availability>in stock</g:availability>
      <g:condition>new</g:condition>
      <g:price>49.00 USD</g:price>
      <g:link>https://store.example.com/products/linen-shirt</g:link>
      <g:image_link>https://cdn.example.com/linen.jpg</g:image_link>
      <g:brand>Example</g:brand>
      <g:google_product_category>212</g:google_product_category>
      <g:item_group_id>1</g:item_group_id>
      <g:gender>unisex</g:gender>
      <g:color>White</g:color>
      <g:size>M</g:size>
      <g:product_type>Shirts</g:product_type>
    </item>
    <item>
      <id>plain-2</id>
      <title>Canvas Tote</title>
      <price>15.00 USD</price>
      <product_type>Bags</product_type>
    </item>
    <item>
      <g:id>shopify_US_3_33</g:id>
    </item>
  </channel>
</rss>"#;

fn config_for(output_path: &str) -> CliConfig {
    CliConfig {
        output_path: Some(output_path.to_string()),
        ..Default::default()
    }
}

fn read_output(path: &str) -> Result<Vec<csv::StringRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    assert_eq!(headers, CANONICAL_SCHEMA);
    Ok(reader.records().collect::<std::result::Result<_, _>>()?)
}

fn column(name: &str) -> usize {
    CANONICAL_SCHEMA.iter().position(|c| *c == name).unwrap()
}

#[tokio::test]
async fn test_end_to_end_xml_feed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let feed_mock = server.mock(|when, then| {
        when.method(GET).path("/products.xml");
        then.status(200)
            .header("Content-Type", "application/rss+xml")
            .body(SHOPIFY_FEED);
    });

    let config = config_for(&output_path);
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = FeedPipeline::new(
        storage,
        config,
        InputSource::XmlFeedUrl(server.url("/products.xml")),
    );
    let engine = ConversionEngine::new(pipeline);

    let written = engine.run().await?;
    feed_mock.assert();

    let expected = std::path::Path::new(&output_path).join("facebook_catalog.csv");
    assert_eq!(written, expected.to_string_lossy());

    let records = read_output(&written)?;
    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(&first[column("id")], "shopify_US_1_11");
    assert_eq!(&first[column("title")], "Linen Shirt");
    assert_eq!(&first[column("description")], "Breathable, relaxed fit");
    assert_eq!(&first[column("price")], "49.00 USD");
    assert_eq!(&first[column("product_tags[0]")], "Shirts");
    assert_eq!(&first[column("fb_product_category")], "");

    let second = &records[1];
    assert_eq!(&second[column("id")], "plain-2");
    assert_eq!(&second[column("price")], "15.00 USD");
    assert_eq!(&second[column("product_tags[0]")], "Bags");

    let third = &records[2];
    assert_eq!(&third[column("id")], "shopify_US_3_33");
    assert!(third.iter().skip(1).all(str::is_empty));

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_shared_sheet() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let export_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/spreadsheets/d/1AbC/export")
            .query_param("format", "csv");
        then.status(200).header("Content-Type", "text/csv").body(
            "title,id,notes,price,video[0].url\n\
             \"Desk, oak\",D-1,internal,120 USD,https://cdn.example.com/desk.mp4\n\
             Stool,D-2,,35 USD,\n",
        );
    });

    let config = config_for(&output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = FeedPipeline::new(
        storage,
        config,
        InputSource::SharedSheetUrl(server.url("/spreadsheets/d/1AbC/edit?gid=0")),
    );

    let written = ConversionEngine::new(pipeline).with_preview_rows(0).run().await?;
    export_mock.assert();

    let records = read_output(&written)?;
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][column("id")], "D-1");
    assert_eq!(&records[0][column("title")], "Desk, oak");
    assert_eq!(
        &records[0][column("video[0].url")],
        "https://cdn.example.com/desk.mp4"
    );
    assert_eq!(&records[1][column("price")], "35 USD");
    assert!(records.iter().all(|r| r.len() == CANONICAL_SCHEMA.len()));

    Ok(())
}

#[tokio::test]
async fn test_failed_conversion_writes_no_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/empty.xml");
        then.status(200)
            .body("<rss><channel><title>Nothing here</title></channel></rss>");
    });

    let pipeline = FeedPipeline::new(
        LocalStorage::new(output_path.clone()),
        config_for(&output_path),
        InputSource::XmlFeedUrl(server.url("/empty.xml")),
    );

    let result = ConversionEngine::new(pipeline).run().await;

    match result {
        Err(CatalogError::SchemaError(violation)) => {
            assert!(violation.to_string().contains("title"));
        }
        other => panic!("expected schema error, got {:?}", other),
    }
    assert!(!temp_dir.path().join("facebook_catalog.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_malformed_xml_is_reported() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/broken.xml");
        then.status(200).body("<rss><channel><item></channel></rss>");
    });

    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let pipeline = FeedPipeline::new(
        LocalStorage::new(output_path.clone()),
        config_for(&output_path),
        InputSource::XmlFeedUrl(server.url("/broken.xml")),
    );

    let result = pipeline.convert().await;
    assert!(matches!(result, Err(CatalogError::XmlParseError { .. })));

    Ok(())
}
