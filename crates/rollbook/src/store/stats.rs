//! Collection statistics.
//!
//! A single pass over the collection produces the count, the two means, and
//! two fixed-bucket distributions. Bucket edges and labels match the
//! rendered output, so callers only decide how to print them.

use serde::Serialize;

use crate::record::Student;

/// Labels for the age distribution, in bucket order.
const AGE_LABELS: [&str; 4] = ["<18", "18-22", "23-25", ">25"];

/// Labels for the CGPA distribution, in bucket order.
const CGPA_LABELS: [&str; 4] = ["<2.0", "2.0-2.9", "3.0-3.5", ">3.5"];

/// One bucket of a fixed distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    /// Human-readable range label.
    pub label: &'static str,
    /// Number of records falling in the range.
    pub count: usize,
}

impl Bucket {
    /// This bucket's share of `total`, as a percentage.
    #[must_use]
    pub fn percentage(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 * 100.0 / total as f64
        }
    }
}

/// Summary of the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of records.
    pub total: usize,
    /// Mean age in years.
    pub mean_age: f64,
    /// Mean CGPA.
    pub mean_cgpa: f64,
    /// Age distribution over four fixed buckets.
    pub age_distribution: [Bucket; 4],
    /// CGPA distribution over four fixed buckets.
    pub cgpa_distribution: [Bucket; 4],
}

impl Statistics {
    /// Compute statistics over `students`.
    ///
    /// Returns `None` for an empty collection: the means are undefined and
    /// callers print a "no data" notice instead.
    #[must_use]
    pub fn compute(students: &[Student]) -> Option<Self> {
        if students.is_empty() {
            return None;
        }

        let total = students.len();
        let mut age_sum = 0u64;
        let mut cgpa_sum = 0.0f64;
        let mut age_counts = [0usize; 4];
        let mut cgpa_counts = [0usize; 4];

        for student in students {
            age_sum += u64::from(student.age);
            cgpa_sum += student.cgpa;
            age_counts[age_bucket(student.age)] += 1;
            cgpa_counts[cgpa_bucket(student.cgpa)] += 1;
        }

        Some(Self {
            total,
            mean_age: age_sum as f64 / total as f64,
            mean_cgpa: cgpa_sum / total as f64,
            age_distribution: buckets(&AGE_LABELS, &age_counts),
            cgpa_distribution: buckets(&CGPA_LABELS, &cgpa_counts),
        })
    }
}

/// Bucket index for an age: `<18`, `18-22`, `23-25`, `>25`.
fn age_bucket(age: u32) -> usize {
    match age {
        0..=17 => 0,
        18..=22 => 1,
        23..=25 => 2,
        _ => 3,
    }
}

/// Bucket index for a CGPA: `[0,2.0)`, `[2.0,3.0)`, `[3.0,3.5)`, `[3.5,4.0]`.
fn cgpa_bucket(cgpa: f64) -> usize {
    if cgpa < 2.0 {
        0
    } else if cgpa < 3.0 {
        1
    } else if cgpa < 3.5 {
        2
    } else {
        3
    }
}

/// Zip labels and counts into bucket values.
fn buckets(labels: &[&'static str; 4], counts: &[usize; 4]) -> [Bucket; 4] {
    [
        Bucket {
            label: labels[0],
            count: counts[0],
        },
        Bucket {
            label: labels[1],
            count: counts[1],
        },
        Bucket {
            label: labels[2],
            count: counts[2],
        },
        Bucket {
            label: labels[3],
            count: counts[3],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Student> {
        vec![
            Student::new(1, "Ann", 17, 1.5),
            Student::new(2, "Bob", 18, 2.0),
            Student::new(3, "Cam", 22, 2.9),
            Student::new(4, "Dee", 23, 3.0),
            Student::new(5, "Eli", 25, 3.4),
            Student::new(6, "Fay", 26, 3.5),
            Student::new(7, "Gil", 30, 4.0),
        ]
    }

    #[test]
    fn test_empty_collection_has_no_statistics() {
        assert!(Statistics::compute(&[]).is_none());
    }

    #[test]
    fn test_total_and_means() {
        let stats = Statistics::compute(&sample()).unwrap();
        assert_eq!(stats.total, 7);

        let expected_age = (17 + 18 + 22 + 23 + 25 + 26 + 30) as f64 / 7.0;
        assert!((stats.mean_age - expected_age).abs() < 1e-9);

        let expected_cgpa = (1.5 + 2.0 + 2.9 + 3.0 + 3.4 + 3.5 + 4.0) / 7.0;
        assert!((stats.mean_cgpa - expected_cgpa).abs() < 1e-9);
    }

    #[test]
    fn test_age_bucket_boundaries() {
        assert_eq!(age_bucket(17), 0);
        assert_eq!(age_bucket(18), 1);
        assert_eq!(age_bucket(22), 1);
        assert_eq!(age_bucket(23), 2);
        assert_eq!(age_bucket(25), 2);
        assert_eq!(age_bucket(26), 3);
    }

    #[test]
    fn test_cgpa_bucket_boundaries() {
        assert_eq!(cgpa_bucket(1.99), 0);
        assert_eq!(cgpa_bucket(2.0), 1);
        assert_eq!(cgpa_bucket(2.99), 1);
        assert_eq!(cgpa_bucket(3.0), 2);
        assert_eq!(cgpa_bucket(3.49), 2);
        assert_eq!(cgpa_bucket(3.5), 3);
        assert_eq!(cgpa_bucket(4.0), 3);
    }

    #[test]
    fn test_bucket_counts_sum_to_total() {
        let stats = Statistics::compute(&sample()).unwrap();

        let age_total: usize = stats.age_distribution.iter().map(|b| b.count).sum();
        let cgpa_total: usize = stats.cgpa_distribution.iter().map(|b| b.count).sum();
        assert_eq!(age_total, stats.total);
        assert_eq!(cgpa_total, stats.total);
    }

    #[test]
    fn test_distribution_counts() {
        let stats = Statistics::compute(&sample()).unwrap();

        let age_counts: Vec<usize> = stats.age_distribution.iter().map(|b| b.count).collect();
        assert_eq!(age_counts, vec![1, 2, 2, 2]);

        let cgpa_counts: Vec<usize> = stats.cgpa_distribution.iter().map(|b| b.count).collect();
        assert_eq!(cgpa_counts, vec![1, 2, 2, 2]);
    }

    #[test]
    fn test_bucket_percentage() {
        let bucket = Bucket {
            label: "18-22",
            count: 1,
        };
        assert!((bucket.percentage(4) - 25.0).abs() < 1e-9);
        assert!((bucket.percentage(0)).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_labels() {
        let stats = Statistics::compute(&sample()).unwrap();
        assert_eq!(stats.age_distribution[0].label, "<18");
        assert_eq!(stats.age_distribution[3].label, ">25");
        assert_eq!(stats.cgpa_distribution[0].label, "<2.0");
        assert_eq!(stats.cgpa_distribution[3].label, ">3.5");
    }

    #[test]
    fn test_statistics_serialize() {
        let stats = Statistics::compute(&sample()).unwrap();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("mean_age"));
        assert!(json.contains("age_distribution"));
    }
}
