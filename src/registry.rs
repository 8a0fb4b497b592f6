//! The tracked-package registry.
//!
//! A read-only table of the packages the monitor watches: index name,
//! display name, category, relevance tags, and per-package study concepts.
//! Injected into the monitor at construction; nothing here is persisted.

use crate::core::model::{ConceptSet, RelevanceTag};

/// Static description of one tracked package.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageSpec {
    /// Identifier on the package index.
    pub name: &'static str,
    /// Human-readable label.
    pub display_name: &'static str,
    /// Rough grouping, shown in listings.
    pub category: &'static str,
    /// Tags feeding the recommendation table.
    pub relevance: &'static [RelevanceTag],
}

/// The set of packages the monitor watches.
#[derive(Debug, Clone)]
pub struct PackageRegistry {
    specs: Vec<PackageSpec>,
}

impl PackageRegistry {
    /// The built-in watch list.
    pub fn builtin() -> Self {
        use RelevanceTag::{Interview, Portfolio, Production};

        Self {
            specs: vec![
                PackageSpec {
                    name: "torch",
                    display_name: "PyTorch",
                    category: "ML Framework",
                    relevance: &[Portfolio, Interview, Production],
                },
                PackageSpec {
                    name: "transformers",
                    display_name: "Hugging Face Transformers",
                    category: "LLM/NLP",
                    relevance: &[Portfolio, Interview, Production],
                },
                PackageSpec {
                    name: "ultralytics",
                    display_name: "Ultralytics (YOLOv8)",
                    category: "Object Detection",
                    relevance: &[Portfolio, Production],
                },
                PackageSpec {
                    name: "fastapi",
                    display_name: "FastAPI",
                    category: "API Framework",
                    relevance: &[Portfolio, Interview, Production],
                },
                PackageSpec {
                    name: "opencv-python",
                    display_name: "OpenCV",
                    category: "Computer Vision",
                    relevance: &[Portfolio, Interview],
                },
                PackageSpec {
                    name: "ray",
                    display_name: "Ray",
                    category: "Distributed ML",
                    relevance: &[Production, Interview],
                },
                PackageSpec {
                    name: "supervision",
                    display_name: "Supervision (Roboflow)",
                    category: "CV Utilities",
                    relevance: &[Portfolio],
                },
                PackageSpec {
                    name: "onnxruntime",
                    display_name: "ONNX Runtime",
                    category: "Model Optimization",
                    relevance: &[Production],
                },
            ],
        }
    }

    /// Build a registry from explicit specs (tests, custom lists).
    pub fn from_specs(specs: Vec<PackageSpec>) -> Self {
        Self { specs }
    }

    /// All tracked package names, in registry order.
    pub fn names(&self) -> Vec<String> {
        self.specs.iter().map(|s| s.name.to_string()).collect()
    }

    /// Look up a package spec.
    pub fn get(&self, name: &str) -> Option<&PackageSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Display name for a package, falling back to the raw name.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).map(|s| s.display_name).unwrap_or(name)
    }

    /// Relevance tags for a package; empty when unknown.
    pub fn relevance(&self, name: &str) -> &[RelevanceTag] {
        self.get(name).map(|s| s.relevance).unwrap_or(&[])
    }

    /// Iterate the specs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &PackageSpec> {
        self.specs.iter()
    }

    /// Number of tracked packages.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when the registry tracks nothing.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Study concepts for a package, grouped by skill level.
    ///
    /// Packages without a table entry get three empty lists.
    pub fn concepts(&self, name: &str) -> ConceptSet {
        concepts_for(name)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Static concept table, keyed by package identity alone.
fn concepts_for(package: &str) -> ConceptSet {
    match package {
        "torch" => ConceptSet {
            beginner: strings(&["tensor operations", "basic neural networks"]),
            intermediate: strings(&["autograd", "custom datasets", "model saving"]),
            advanced: strings(&[
                "JIT compilation",
                "distributed training",
                "custom C++ extensions",
            ]),
        },
        "transformers" => ConceptSet {
            beginner: strings(&["tokenization", "pre-trained models"]),
            intermediate: strings(&["fine-tuning", "attention mechanisms"]),
            advanced: strings(&["model parallelism", "quantization", "custom architectures"]),
        },
        "ultralytics" => ConceptSet {
            beginner: strings(&["object detection basics", "inference"]),
            intermediate: strings(&["training custom models", "data augmentation"]),
            advanced: strings(&["model export", "optimization", "multi-task learning"]),
        },
        "fastapi" => ConceptSet {
            beginner: strings(&["routes", "request/response"]),
            intermediate: strings(&["dependency injection", "middleware", "async"]),
            advanced: strings(&["OpenAPI customization", "background tasks", "websockets"]),
        },
        "opencv-python" => ConceptSet {
            beginner: strings(&["image loading", "basic transforms"]),
            intermediate: strings(&["feature detection", "contours"]),
            advanced: strings(&["camera calibration", "stereo vision", "GPU acceleration"]),
        },
        "ray" => ConceptSet {
            beginner: strings(&["remote functions", "actors"]),
            intermediate: strings(&["object store", "task dependencies"]),
            advanced: strings(&["cluster deployment", "autoscaling", "placement groups"]),
        },
        "supervision" => ConceptSet {
            beginner: strings(&["annotation visualization", "video processing"]),
            intermediate: strings(&["tracking", "zone counting"]),
            advanced: strings(&["custom annotators", "integration patterns"]),
        },
        "onnxruntime" => ConceptSet {
            beginner: strings(&["model loading", "inference"]),
            intermediate: strings(&["execution providers", "optimization"]),
            advanced: strings(&["custom operators", "quantization", "graph optimization"]),
        },
        _ => ConceptSet::default(),
    }
}
