//! Site-wide settings singleton and its partial-update patch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// The seven day keys of the work-hours table, serialized lowercase.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkDay {
    pub open: String,
    pub close: String,
    pub enabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub phone: String,
    pub address: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLinks {
    pub vk: String,
    pub instagram: String,
    pub telegram: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub site_name: String,
    pub work_hours: BTreeMap<Weekday, WorkDay>,
    pub contact_info: ContactInfo,
    pub social_links: SocialLinks,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkDayPatch {
    pub open: Option<String>,
    pub close: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfoPatch {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLinksPatch {
    pub vk: Option<String>,
    pub instagram: Option<String>,
    pub telegram: Option<String>,
}

/// Partial update: only fields present are written. The site name is not
/// editable through a patch.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SettingsPatch {
    pub contact_info: Option<ContactInfoPatch>,
    pub work_hours: BTreeMap<Weekday, WorkDayPatch>,
    pub social_links: Option<SocialLinksPatch>,
}

fn set_if<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl Settings {
    /// Apply `patch` in place. Every patched day must already exist in the
    /// table; otherwise nothing is modified and `Malformed` is returned.
    pub fn apply(&mut self, patch: SettingsPatch) -> Result<(), ModelError> {
        if let Some(day) = patch.work_hours.keys().find(|d| !self.work_hours.contains_key(*d)) {
            return Err(ModelError::Malformed(format!("work_hours.{} is missing", day.as_str())));
        }

        if let Some(c) = patch.contact_info {
            set_if(&mut self.contact_info.phone, c.phone);
            set_if(&mut self.contact_info.address, c.address);
            set_if(&mut self.contact_info.email, c.email);
        }
        for (day, p) in patch.work_hours {
            if let Some(slot) = self.work_hours.get_mut(&day) {
                set_if(&mut slot.open, p.open);
                set_if(&mut slot.close, p.close);
                set_if(&mut slot.enabled, p.enabled);
            }
        }
        if let Some(s) = patch.social_links {
            set_if(&mut self.social_links.vk, s.vk);
            set_if(&mut self.social_links.instagram, s.instagram);
            set_if(&mut self.social_links.telegram, s.telegram);
        }
        Ok(())
    }

    pub fn seed() -> Self {
        let work_hours = Weekday::ALL
            .into_iter()
            .map(|day| {
                let hours = if day == Weekday::Sunday {
                    WorkDay { open: "10:00".into(), close: "20:00".into(), enabled: true }
                } else {
                    WorkDay { open: "08:00".into(), close: "22:00".into(), enabled: true }
                };
                (day, hours)
            })
            .collect();

        Settings {
            site_name: "Автомойка «Блеск»".into(),
            work_hours,
            contact_info: ContactInfo {
                phone: "+7 (900) 123-45-67".into(),
                address: "г. Москва, ул. Примерная, 10".into(),
                email: "info@blesk-wash.ru".into(),
            },
            social_links: SocialLinks {
                vk: "https://vk.com/blesk_wash".into(),
                instagram: "https://instagram.com/blesk_wash".into(),
                telegram: "https://t.me/blesk_wash".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_covers_all_seven_days_in_order() {
        let s = Settings::seed();
        let days: Vec<Weekday> = s.work_hours.keys().copied().collect();
        assert_eq!(days, Weekday::ALL.to_vec());
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["work_hours"]["sunday"]["open"], "10:00");
        assert_eq!(json["contact_info"]["email"], "info@blesk-wash.ru");
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let mut s = Settings::seed();
        let before = s.clone();
        let patch: SettingsPatch = serde_json::from_value(serde_json::json!({
            "contact_info": {"phone": "+7 111"},
            "work_hours": {"monday": {"enabled": false}, "sunday": {"open": "11:00", "close": "18:00"}},
            "social_links": {"telegram": "https://t.me/new"}
        }))
        .unwrap();
        s.apply(patch).unwrap();

        assert_eq!(s.contact_info.phone, "+7 111");
        assert_eq!(s.contact_info.address, before.contact_info.address);
        assert!(!s.work_hours[&Weekday::Monday].enabled);
        assert_eq!(s.work_hours[&Weekday::Monday].open, "08:00");
        assert_eq!(s.work_hours[&Weekday::Sunday].open, "11:00");
        assert_eq!(s.work_hours[&Weekday::Sunday].close, "18:00");
        assert_eq!(s.work_hours[&Weekday::Tuesday], before.work_hours[&Weekday::Tuesday]);
        assert_eq!(s.social_links.telegram, "https://t.me/new");
        assert_eq!(s.social_links.vk, before.social_links.vk);
        assert_eq!(s.site_name, before.site_name);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut s = Settings::seed();
        s.apply(SettingsPatch::default()).unwrap();
        assert_eq!(s, Settings::seed());
    }

    #[test]
    fn patching_an_absent_day_is_malformed_and_changes_nothing() {
        let mut s = Settings::seed();
        s.work_hours.remove(&Weekday::Sunday);
        let snapshot = s.clone();
        let mut patch = SettingsPatch {
            contact_info: Some(ContactInfoPatch { phone: Some("changed".into()), ..Default::default() }),
            ..Default::default()
        };
        patch.work_hours.insert(Weekday::Sunday, WorkDayPatch { enabled: Some(false), ..Default::default() });
        assert!(matches!(s.apply(patch), Err(ModelError::Malformed(_))));
        assert_eq!(s, snapshot);
    }

    #[test]
    fn unknown_day_key_is_rejected() {
        let res: Result<SettingsPatch, _> =
            serde_json::from_value(serde_json::json!({"work_hours": {"funday": {"enabled": true}}}));
        assert!(res.is_err());
    }

    #[test]
    fn stored_document_without_contact_info_does_not_parse() {
        let mut v = serde_json::to_value(Settings::seed()).unwrap();
        v.as_object_mut().unwrap().remove("contact_info");
        let err = serde_json::from_value::<Settings>(v).unwrap_err();
        assert!(err.is_data());
    }
}
