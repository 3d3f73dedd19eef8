use serde::{Deserialize, Serialize};

use crate::errors::{require_non_blank, ModelError};
use crate::record::Record;

/// Substituted when a service is saved without an image.
pub const DEFAULT_SERVICE_IMAGE: &str =
    "https://images.unsplash.com/photo-1607860108855-64acf2078ed9?w=800";

/// A wash package shown on the services page.
/// - `price` is free-form, e.g. `"от 500 ₽"`
/// - `image` is a URL, never blank once stored
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

/// Create/update input: no id, it is allocated by the repository.
/// Omitted fields deserialize as empty strings.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

fn image_or_default(image: String) -> String {
    if image.trim().is_empty() {
        DEFAULT_SERVICE_IMAGE.to_string()
    } else {
        image
    }
}

impl Record for Service {
    type Input = ServiceInput;

    const COLLECTION: &'static str = "services";
    const LABEL: &'static str = "service";

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_new(input: &ServiceInput) -> Result<(), ModelError> {
        require_non_blank("title", &input.title)?;
        require_non_blank("description", &input.description)?;
        require_non_blank("price", &input.price)?;
        Ok(())
    }

    fn create(id: u64, input: ServiceInput) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            price: input.price,
            image: image_or_default(input.image),
        }
    }

    fn apply(&mut self, input: ServiceInput) {
        self.title = input.title;
        self.description = input.description;
        self.price = input.price;
        self.image = image_or_default(input.image);
    }

    fn seed() -> Vec<Self> {
        vec![
            Service {
                id: 1,
                title: "Экспресс-мойка".into(),
                description: "Бесконтактная мойка кузова, сушка, чернение шин.".into(),
                price: "от 500 ₽".into(),
                image: DEFAULT_SERVICE_IMAGE.into(),
            },
            Service {
                id: 2,
                title: "Комплексная мойка".into(),
                description: "Мойка кузова и ковриков, уборка салона пылесосом, протирка стёкол."
                    .into(),
                price: "от 1200 ₽".into(),
                image: DEFAULT_SERVICE_IMAGE.into(),
            },
            Service {
                id: 3,
                title: "Химчистка салона".into(),
                description: "Глубокая чистка сидений, потолка и ковров с сушкой.".into(),
                price: "от 5000 ₽".into(),
                image: DEFAULT_SERVICE_IMAGE.into(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, description: &str, price: &str) -> ServiceInput {
        ServiceInput { title: title.into(), description: description.into(), price: price.into(), image: String::new() }
    }

    #[test]
    fn create_requires_title_description_price() {
        assert!(Service::validate_new(&input("Wash", "Basic wash", "500")).is_ok());
        for bad in [input(" ", "d", "p"), input("t", "", "p"), input("t", "d", "\t")] {
            assert!(matches!(Service::validate_new(&bad), Err(ModelError::Validation(_))));
        }
    }

    #[test]
    fn blank_image_falls_back_to_default() {
        let svc = Service::create(7, input("Wash", "Basic", "500"));
        assert_eq!(svc.id, 7);
        assert_eq!(svc.image, DEFAULT_SERVICE_IMAGE);

        let mut svc = svc;
        svc.apply(ServiceInput { image: "https://cdn/x.jpg".into(), ..input("A", "B", "C") });
        assert_eq!(svc.image, "https://cdn/x.jpg");
        svc.apply(ServiceInput { image: "   ".into(), ..input("A", "B", "C") });
        assert_eq!(svc.image, DEFAULT_SERVICE_IMAGE);
    }

    #[test]
    fn apply_replaces_every_field_even_with_blanks() {
        let mut svc = Service::create(1, input("Wash", "Basic", "500"));
        svc.apply(input("", "X", "Y"));
        assert_eq!(svc.title, "");
        assert_eq!(svc.description, "X");
        assert_eq!(svc.price, "Y");
        assert_eq!(svc.id, 1);
    }

    #[test]
    fn omitted_input_fields_are_empty() {
        let parsed: ServiceInput = serde_json::from_str(r#"{"description":"X"}"#).unwrap();
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.description, "X");
        assert_eq!(parsed.price, "");
    }

    #[test]
    fn seed_ids_are_sequential() {
        let ids: Vec<u64> = Service::seed().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
