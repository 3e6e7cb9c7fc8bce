//! Fixed sample postings used to seed a fresh store.

use crate::JobPost;

/// The five sample postings, ids 1 through 5.
pub fn sample_posts() -> Vec<JobPost> {
    vec![
        JobPost::new(
            1,
            "Java Developer",
            "Must have good experience in core Java and advanced Java",
            2,
            ["Core Java", "J2EE", "Spring Boot", "Hibernate"],
        ),
        JobPost::new(
            2,
            "Frontend Developer",
            "Experience in building responsive web applications using React",
            3,
            ["HTML", "CSS", "JavaScript", "React"],
        ),
        JobPost::new(
            3,
            "Data Scientist",
            "Strong background in machine learning and data analysis",
            4,
            ["Python", "Machine Learning", "Data Analysis"],
        ),
        JobPost::new(
            4,
            "Network Engineer",
            "Design and implement computer networks for efficient data communication",
            5,
            ["Networking", "Cisco", "Routing", "Switching"],
        ),
        JobPost::new(
            5,
            "Mobile App Developer",
            "Experience in mobile app development for iOS and Android",
            3,
            ["iOS Development", "Android Development", "Mobile App"],
        ),
    ]
}
