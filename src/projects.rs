/// A showcase section on the landing page
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    /// Image goes to the right of the text instead of the left
    pub image_right: bool,
    /// Text is styled for a dark background
    pub dark_bg: bool,
}

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Donec tincidunt ipsum augue. In faucibus vehicula magna pulvinar aliquam. Cras aliquam feugiat lorem non auctor. Quisque sed lorem egestas mauris venenatis commodo eu id nibh. Ut porta libero sed semper faucibus.";

pub const PROJECTS: &[Project] = &[
    Project {
        title: "MONSOON III",
        image: "https://i.vimeocdn.com/custom_asset/6901fb9c170ed1ca1403e2130e687da4",
        description: LOREM,
        image_right: false,
        dark_bg: false,
    },
    Project {
        title: "BEAMS",
        image: "https://i.vimeocdn.com/custom_asset/a249c042da3d2a38df82e5c274aee876",
        description: LOREM,
        image_right: true,
        dark_bg: true,
    },
    Project {
        title: "Move 2",
        image: "https://i.vimeocdn.com/custom_asset/94078a0190b78a2b7e767c5d89ca888e",
        description: LOREM,
        image_right: false,
        dark_bg: true,
    },
];

/// A project plus the layout decisions that depend on its position
#[derive(Debug, Serialize)]
pub struct ProjectSection {
    pub project: &'static Project,
    /// The first section is the headline one, larger and on white
    pub featured: bool,
}

impl ProjectSection {
    pub fn css_class(&self) -> String {
        let mut classes = vec!["project"];
        classes.push(if self.featured {
            "project-featured"
        } else {
            "project-regular"
        });
        if self.project.image_right {
            classes.push("image-right");
        }
        classes.push(if self.project.dark_bg {
            "text-dark-bg"
        } else {
            "text-light-bg"
        });
        classes.join(" ")
    }
}

/// The headline section(s) and the ones shown on the gradient below
pub fn sections() -> (Vec<ProjectSection>, Vec<ProjectSection>) {
    PROJECTS
        .iter()
        .enumerate()
        .map(|(i, p)| ProjectSection {
            project: p,
            featured: i == 0,
        })
        .partition(|s| s.featured)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sections() {
        let (first, rest) = sections();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].project.title, "MONSOON III");
        assert!(first[0].featured);
        assert_eq!(rest.len(), 2);
        assert!(rest.iter().all(|s| !s.featured));
        assert_eq!(rest[0].project.title, "BEAMS");
    }

    #[test]
    fn test_css_class() {
        let (first, rest) = sections();
        assert_eq!(first[0].css_class(), "project project-featured text-light-bg");
        assert_eq!(
            rest[0].css_class(),
            "project project-regular image-right text-dark-bg"
        );
    }
}
