//! Sample stories shown on a fresh wall.

use crate::story::Story;
use chrono::{TimeZone, Utc};
use wall_ids::StoryId;
use wall_types::NonEmptyText;

struct Sample {
    id: u64,
    name: &'static str,
    region: &'static str,
    text: &'static str,
    likes: u64,
    day: u32,
}

const SAMPLES: [Sample; 6] = [
    Sample {
        id: 1,
        name: "فاطمة الأحمدي",
        region: "الرياض",
        text: "أفتخر بكوني جزءاً من هذا الوطن العظيم. رؤية 2030 غيّرت حياتنا وفتحت أمامنا آفاقاً جديدة للنجاح والإبداع. المملكة اليوم تشهد نهضة حقيقية في جميع المجالات.",
        likes: 42,
        day: 10,
    },
    Sample {
        id: 2,
        name: "محمد السالم",
        region: "جدة",
        text: "من طفولتي وأنا أحلم برؤية المملكة تتقدم وتزدهر. اليوم أشعر بالفخر عندما أرى إنجازاتنا في مختلف المجالات من التقنية إلى الرياضة إلى السياحة.",
        likes: 38,
        day: 12,
    },
    Sample {
        id: 3,
        name: "نورا القحطاني",
        region: "الدمام",
        text: "كمرأة سعودية، أفتخر بالدعم الكبير الذي تقدمه القيادة لتمكين المرأة. اليوم نحن جزء فعّال في بناء مستقبل الوطن في كافة القطاعات.",
        likes: 56,
        day: 8,
    },
    Sample {
        id: 4,
        name: "عبدالله المطيري",
        region: "المدينة المنورة",
        text: "أفتخر بتراثنا العريق وحضارتنا الأصيلة. المملكة تجمع بين الأصالة والمعاصرة بشكل مميز، وهذا ما يجعلها فريدة بين دول العالم.",
        likes: 31,
        day: 11,
    },
    Sample {
        id: 5,
        name: "سارة الزهراني",
        region: "أبها",
        text: "مناظرنا الطبيعية الخلابة في عسير تعكس جمال وطننا الساحر. من الجبال الخضراء إلى السهول الذهبية، المملكة جنة على الأرض.",
        likes: 29,
        day: 9,
    },
    Sample {
        id: 6,
        name: "خالد العتيبي",
        region: "الطائف",
        text: "كشاب سعودي، أفتخر بالفرص اللامحدودة التي توفرها بلادي للشباب. من ريادة الأعمال إلى الابتكار والتقنية، السعودية تستثمر في شبابها.",
        likes: 44,
        day: 13,
    },
];

/// The six sample stories, in display order (ids 1 to 6, text only).
pub fn sample_stories() -> Vec<Story> {
    SAMPLES
        .iter()
        .map(|s| {
            Story::new(
                StoryId::new(s.id),
                NonEmptyText::new(s.name).expect("sample names are non-empty"),
                s.region,
                s.text,
                None,
                s.likes,
                Utc.with_ymd_and_hms(2024, 9, s.day, 0, 0, 0)
                    .single()
                    .expect("sample dates are valid"),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::MediaKind;
    use std::collections::HashSet;

    #[test]
    fn test_samples_shape() {
        let stories = sample_stories();

        assert_eq!(stories.len(), 6);
        assert_eq!(
            stories.iter().map(Story::like_count).collect::<Vec<_>>(),
            vec![42, 38, 56, 31, 29, 44]
        );
        assert_eq!(stories.iter().map(Story::like_count).sum::<u64>(), 240);
        assert!(stories.iter().all(|s| s.media_kind() == MediaKind::Text));
    }

    #[test]
    fn test_samples_have_unique_ids_and_regions() {
        let stories = sample_stories();
        let ids: HashSet<_> = stories.iter().map(Story::id).collect();
        let regions: HashSet<_> = stories.iter().map(Story::region).collect();

        assert_eq!(ids.len(), 6);
        assert_eq!(regions.len(), 6);
    }
}
