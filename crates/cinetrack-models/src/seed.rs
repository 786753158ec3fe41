use crate::movie::MovieRecord;

struct SeedMovie {
    id: &'static str,
    title: &'static str,
    year: &'static str,
    image: Option<&'static str>,
    rating: &'static str,
    description: &'static str,
    genre: &'static str,
}

const SEED: &[SeedMovie] = &[
    SeedMovie {
        id: "tt0111161",
        title: "The Shawshank Redemption",
        year: "1994",
        image: Some("https://m.media-amazon.com/images/M/MV5BNDE3ODcxYzMtY2YzZC00NmNlLWJiNDMtZDViZWM2MzIxZDYwXkEyXkFqcGdeQXVyNjAwNDUxODI@._V1_.jpg"),
        rating: "9.3",
        description: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
        genre: "Drama",
    },
    SeedMovie {
        id: "tt0068646",
        title: "The Godfather",
        year: "1972",
        image: Some("https://m.media-amazon.com/images/M/MV5BM2MyNjYxNmUtYTAwNi00MTYxLWJmNWYtYzZlODY3ZTk3OTFlXkEyXkFqcGdeQXVyNzkwMjQ5NzM@._V1_.jpg"),
        rating: "9.2",
        description: "The aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
        genre: "Crime, Drama",
    },
    SeedMovie {
        id: "tt0468569",
        title: "The Dark Knight",
        year: "2008",
        image: Some("https://m.media-amazon.com/images/M/MV5BMTMxNTMwODM0NF5BMl5BanBnXkFtZTcwODAyMTk2Mw@@._V1_.jpg"),
        rating: "9.0",
        description: "When the Joker wreaks havoc on Gotham, Batman must accept one of the greatest psychological and physical tests.",
        genre: "Action, Crime, Drama",
    },
    SeedMovie {
        id: "tt0110912",
        title: "Pulp Fiction",
        year: "1994",
        image: None,
        rating: "8.9",
        description: "The lives of two mob hitmen, a boxer, a gangster and his wife intertwine in four tales of violence and redemption.",
        genre: "Crime, Drama",
    },
    SeedMovie {
        id: "tt0109830",
        title: "Forrest Gump",
        year: "1994",
        image: None,
        rating: "8.8",
        description: "Decades of American history unfold through the perspective of a kind-hearted man from Alabama.",
        genre: "Drama, Romance",
    },
    SeedMovie {
        id: "tt1375666",
        title: "Inception",
        year: "2010",
        image: None,
        rating: "8.8",
        description: "A thief who steals corporate secrets through dream-sharing technology is given the task of planting an idea.",
        genre: "Action, Adventure, Sci-Fi",
    },
    SeedMovie {
        id: "tt0133093",
        title: "The Matrix",
        year: "1999",
        image: None,
        rating: "8.7",
        description: "A computer hacker learns the true nature of his reality and his role in the war against its controllers.",
        genre: "Action, Sci-Fi",
    },
    SeedMovie {
        id: "tt0137523",
        title: "Fight Club",
        year: "1999",
        image: None,
        rating: "8.8",
        description: "An insomniac office worker and a devil-may-care soap maker form an underground fight club.",
        genre: "Drama",
    },
];

/// Static fallback catalog, in a fixed order
pub fn seed_movies() -> Vec<MovieRecord> {
    SEED.iter()
        .map(|seed| MovieRecord {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            release_year: seed.year.to_string(),
            image: seed.image.map(str::to_string),
            rating: seed.rating.to_string(),
            description: Some(seed.description.to_string()),
            genre: Some(seed.genre.to_string()),
        })
        .collect()
}
