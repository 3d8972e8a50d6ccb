//! Static geography reference: Colombian departments and a selection of
//! their municipalities. Pure lookup data, never mutated at runtime.

pub struct Region {
    pub name: &'static str,
    pub localities: &'static [&'static str],
}

static REGIONS: &[Region] = &[
    Region {
        name: "Amazonas",
        localities: &["Leticia", "Puerto Nariño"],
    },
    Region {
        name: "Antioquia",
        localities: &["Medellín", "Bello", "Itagüí", "Envigado", "Rionegro", "Apartadó"],
    },
    Region {
        name: "Arauca",
        localities: &["Arauca", "Saravena", "Tame"],
    },
    Region {
        name: "Atlántico",
        localities: &["Barranquilla", "Soledad", "Malambo", "Sabanalarga"],
    },
    Region {
        name: "Bogotá D.C.",
        localities: &["Bogotá"],
    },
    Region {
        name: "Bolívar",
        localities: &["Cartagena", "Magangué", "Turbaco", "Arjona"],
    },
    Region {
        name: "Boyacá",
        localities: &["Tunja", "Duitama", "Sogamoso", "Chiquinquirá", "Paipa"],
    },
    Region {
        name: "Caldas",
        localities: &["Manizales", "La Dorada", "Chinchiná", "Villamaría"],
    },
    Region {
        name: "Caquetá",
        localities: &["Florencia", "San Vicente del Caguán"],
    },
    Region {
        name: "Casanare",
        localities: &["Yopal", "Aguazul", "Villanueva"],
    },
    Region {
        name: "Cauca",
        localities: &["Popayán", "Santander de Quilichao", "Puerto Tejada"],
    },
    Region {
        name: "Cesar",
        localities: &["Valledupar", "Aguachica", "Bosconia"],
    },
    Region {
        name: "Chocó",
        localities: &["Quibdó", "Istmina", "Bahía Solano"],
    },
    Region {
        name: "Córdoba",
        localities: &["Montería", "Cereté", "Lorica", "Sahagún"],
    },
    Region {
        name: "Cundinamarca",
        localities: &["Soacha", "Zipaquirá", "Facatativá", "Chía", "Girardot", "Fusagasugá"],
    },
    Region {
        name: "Guainía",
        localities: &["Inírida"],
    },
    Region {
        name: "Guaviare",
        localities: &["San José del Guaviare"],
    },
    Region {
        name: "Huila",
        localities: &["Neiva", "Pitalito", "Garzón", "La Plata"],
    },
    Region {
        name: "La Guajira",
        localities: &["Riohacha", "Maicao", "Uribia", "Fonseca"],
    },
    Region {
        name: "Magdalena",
        localities: &["Santa Marta", "Ciénaga", "Fundación"],
    },
    Region {
        name: "Meta",
        localities: &["Villavicencio", "Acacías", "Granada", "Puerto López"],
    },
    Region {
        name: "Nariño",
        localities: &["Pasto", "Tumaco", "Ipiales", "Túquerres"],
    },
    Region {
        name: "Norte de Santander",
        localities: &["Cúcuta", "Ocaña", "Pamplona", "Villa del Rosario"],
    },
    Region {
        name: "Putumayo",
        localities: &["Mocoa", "Puerto Asís", "Orito"],
    },
    Region {
        name: "Quindío",
        localities: &[
            "Armenia",
            "Calarcá",
            "Circasia",
            "Córdoba",
            "Filandia",
            "Génova",
            "La Tebaida",
            "Montenegro",
            "Pijao",
            "Quimbaya",
            "Salento",
            "Buenavista",
        ],
    },
    Region {
        name: "Risaralda",
        localities: &["Pereira", "Dosquebradas", "Santa Rosa de Cabal", "La Virginia"],
    },
    Region {
        name: "San Andrés y Providencia",
        localities: &["San Andrés", "Providencia"],
    },
    Region {
        name: "Santander",
        localities: &["Bucaramanga", "Floridablanca", "Girón", "Piedecuesta", "Barrancabermeja"],
    },
    Region {
        name: "Sucre",
        localities: &["Sincelejo", "Corozal", "San Marcos"],
    },
    Region {
        name: "Tolima",
        localities: &["Ibagué", "Espinal", "Melgar", "Honda"],
    },
    Region {
        name: "Valle del Cauca",
        localities: &["Cali", "Buenaventura", "Palmira", "Tuluá", "Cartago", "Buga"],
    },
    Region {
        name: "Vaupés",
        localities: &["Mitú"],
    },
    Region {
        name: "Vichada",
        localities: &["Puerto Carreño", "La Primavera"],
    },
];

/// Names of every known region, in table order.
pub fn regions() -> Vec<&'static str> {
    REGIONS.iter().map(|r| r.name).collect()
}

/// Municipalities of a region, or `None` when the region is unknown.
/// Lookup ignores ASCII case so "quindío" and "Quindío" both resolve.
pub fn localities(region: &str) -> Option<&'static [&'static str]> {
    REGIONS
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(region))
        .map(|r| r.localities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_all_33_regions() {
        assert_eq!(regions().len(), 33);
    }

    #[test]
    fn quindio_contains_armenia() {
        let towns = localities("Quindío").expect("Quindío is in the table");
        assert!(towns.contains(&"Armenia"));
    }

    #[test]
    fn lookup_ignores_ascii_case() {
        assert!(localities("antioquia").is_some());
    }

    #[test]
    fn unknown_region_is_none() {
        assert!(localities("Atlantis").is_none());
    }
}
