//! Sample catalog written on first start.

use chrono::{DateTime, TimeZone, Utc};

use super::{CatalogEntry, Category};

fn seeded_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn entry(
    id: u64,
    title: &str,
    category: Category,
    presenter: &str,
    summary: &str,
    file_url: &str,
    created_at: DateTime<Utc>,
) -> CatalogEntry {
    CatalogEntry {
        id,
        title: title.to_string(),
        category,
        presenter: presenter.to_string(),
        summary: summary.to_string(),
        file_url: file_url.to_string(),
        created_at,
    }
}

/// The default dataset: six entries, two per category.
pub fn default_entries() -> Vec<CatalogEntry> {
    vec![
        entry(
            1,
            "Dasar-dasar Fiqih untuk Pemula",
            Category::Video,
            "Ustadz Ahmad Firdaus",
            "Pengenalan dasar hukum Islam untuk pemula dengan pendekatan praktis",
            "video1.mp4",
            seeded_at(2023, 3, 15, 8, 30),
        ),
        entry(
            2,
            "Kajian Hadits Arba'in An-Nawawi",
            Category::Audio,
            "Ustadz Muhammad Rizki",
            "Pembahasan lengkap tentang 40 hadits pilihan dalam kitab Arba'in An-Nawawi",
            "audio1.mp3",
            seeded_at(2023, 3, 17, 10, 15),
        ),
        entry(
            3,
            "Shahih Bukhari: Hadits ke-1",
            Category::Hadist,
            "Ustadz Zainuddin",
            "Penjelasan mendetail tentang hadits pertama dalam kitab Shahih Bukhari",
            "hadist1.txt",
            seeded_at(2023, 3, 19, 9, 45),
        ),
        entry(
            4,
            "Sirah Nabawiyah: Kelahiran Rasulullah",
            Category::Video,
            "Ustadzah Fatimah",
            "Kisah detil tentang kelahiran dan masa kecil Rasulullah SAW",
            "video2.mp4",
            seeded_at(2023, 3, 20, 14, 30),
        ),
        entry(
            5,
            "Tafsir Surah Al-Fatihah",
            Category::Audio,
            "Ustadz Abdullah",
            "Pembahasan mendalam tentang makna dan tafsir surah Al-Fatihah",
            "audio2.mp3",
            seeded_at(2023, 3, 22, 16, 0),
        ),
        entry(
            6,
            "Shahih Muslim: Hadits Pilihan",
            Category::Hadist,
            "Ustadz Hasan",
            "Kumpulan hadits-hadits pilihan dari kitab Shahih Muslim dengan penjelasan",
            "hadist2.txt",
            seeded_at(2023, 3, 25, 11, 30),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_entries_have_unique_sequential_ids() {
        let entries = default_entries();
        let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 6);
    }

    #[test]
    fn test_default_entries_cover_every_category() {
        let entries = default_entries();
        for category in Category::ALL {
            let count = entries.iter().filter(|e| e.category == category).count();
            assert_eq!(count, 2, "expected two {} entries", category);
        }
    }

    #[test]
    fn test_default_timestamps_are_not_epoch() {
        for entry in default_entries() {
            assert!(entry.created_at.timestamp() > 0);
            assert!(!entry.title.trim().is_empty());
        }
    }
}
