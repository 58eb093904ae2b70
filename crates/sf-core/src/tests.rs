//! Snapshot tests for the outfit data model

#[cfg(test)]
mod snapshot_tests {
    use crate::{GenerationConfig, OUTFIT_PROMPT, Result, VisionModel, parse};
    use async_trait::async_trait;
    use insta::{assert_snapshot, assert_yaml_snapshot};

    struct CannedModel(&'static str);

    #[async_trait]
    impl VisionModel for CannedModel {
        async fn describe_image(&self, _image: &[u8], _media_type: &str, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn model_id(&self) -> &str {
            "canned"
        }
    }

    #[test]
    fn test_parsed_reply_snapshot() {
        let reply = "### 1. Description
Smart casual
### 5. Fashion Tips
- Roll the sleeves
### 6. Similar Items
1. **Linen Shirt**
- Breathable summer staple";

        assert_yaml_snapshot!(parse(reply), @r###"
        ---
        analysis:
          description: Smart casual
          colorTones: ""
          coreApparel: ""
          accessories: ""
        fashionTips:
          - Roll the sleeves
        suggestedItems:
          - name: Linen Shirt
            description: Breathable summer staple
            imageUrl: "https://www.nordstrom.com/s/linen-shirt"
            productUrl: "https://www.nordstrom.com/s/linen-shirt"
        "###);
    }

    #[test]
    fn test_prompt_lists_six_sections() {
        let headings: Vec<&str> = OUTFIT_PROMPT
            .lines()
            .skip(1)
            .filter_map(|line| line.split(':').next())
            .collect();

        assert_snapshot!(headings.join("\n"), @r###"
        1. Description
        2. Color Tones
        3. Core Apparel
        4. Accessories
        5. Fashion Tips
        6. Similar Items
        "###);
    }

    #[test]
    fn test_generation_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.timeout.as_secs(), 60);
    }

    #[tokio::test]
    async fn test_model_trait_object() {
        let model: Box<dyn VisionModel> = Box::new(CannedModel("### Accessories\nA red beret"));
        let reply = model
            .describe_image(b"not really a jpeg", "image/jpeg", OUTFIT_PROMPT)
            .await
            .unwrap();

        assert_eq!(parse(&reply).analysis.accessories, "A red beret");
        assert_eq!(model.model_id(), "canned");
    }
}
